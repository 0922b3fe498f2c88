// file: src/auth/strategy.rs
// description: one-time choice between shared-key and token authentication for a run
// reference: startup credential selection

use super::credential::{DefaultCredential, KeyCredential, SEARCH_SCOPE, TokenCredential};
use super::policy::AuthPolicy;
use crate::config::Config;
use crate::error::Result;
use crate::http::Policy;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Selected once at startup and handed to every client constructor, so both
/// clients of a run always authenticate the same way.
#[derive(Clone)]
pub enum AuthStrategy {
    SharedKey(KeyCredential),
    Token(Arc<dyn TokenCredential>),
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl AuthStrategy {
    /// A non-empty `api_key` wins; otherwise `token_source` is asked for a
    /// credential and its error is returned unchanged.
    pub fn select<F>(api_key: Option<&str>, token_source: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Arc<dyn TokenCredential>>,
    {
        match api_key.filter(|k| !k.is_empty()) {
            Some(key) => Ok(Self::SharedKey(KeyCredential::new(key))),
            None => Ok(Self::Token(token_source()?)),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::select(config.api_key.as_deref(), || {
            let credential: Arc<dyn TokenCredential> = Arc::new(DefaultCredential::create()?);
            Ok(credential)
        })
    }

    /// Token mode asks for one token up front so an unusable identity fails
    /// the run before any index operation.
    pub async fn preflight(&self) -> Result<()> {
        match self {
            Self::SharedKey(_) => Ok(()),
            Self::Token(credential) => {
                let token = credential.get_token(&[SEARCH_SCOPE]).await?;
                debug!(expires_on = ?token.expires_on, "Credential preflight succeeded");
                Ok(())
            }
        }
    }

    /// A fresh policy instance; each pipeline owns its own.
    pub fn policy(&self) -> Result<Arc<dyn Policy>> {
        let policy = match self {
            Self::SharedKey(key) => AuthPolicy::shared_key(key)?,
            Self::Token(credential) => AuthPolicy::bearer(Arc::clone(credential), &[SEARCH_SCOPE]),
        };
        Ok(Arc::new(policy))
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::SharedKey(_) => "api key",
            Self::Token(_) => "token credential",
        }
    }

    pub fn log_selection(&self) {
        info!(auth = self.describe(), "Authentication strategy selected");
    }
}
