// file: src/auth/credential.rs
// description: shared-key and token credentials, with the azure_identity default chain behind a local trait
// reference: https://docs.rs/azure_identity

use crate::error::{Result, SearchError};
use async_trait::async_trait;
use azure_core::auth::TokenCredential as _;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Authorization scope for Azure AI Search data and management planes.
pub const SEARCH_SCOPE: &str = "https://search.azure.com/.default";

/// Static secret presented as the `api-key` header.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyCredential(String);

impl KeyCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyCredential(<redacted>)")
    }
}

#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Issues bearer tokens for a set of scopes. Caching and refresh are the
/// implementor's concern.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken>;
}

/// The azure_identity default chain (environment, workload identity,
/// managed identity, Azure CLI).
pub struct DefaultCredential {
    inner: Arc<dyn azure_core::auth::TokenCredential>,
}

impl DefaultCredential {
    pub fn create() -> Result<Self> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .map_err(|e| SearchError::Credential(format!("default credential chain: {e}")))?;

        Ok(Self {
            inner: Arc::new(credential),
        })
    }
}

#[async_trait]
impl TokenCredential for DefaultCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken> {
        debug!(?scopes, "Requesting token from default credential chain");

        let token = self
            .inner
            .get_token(scopes)
            .await
            .map_err(|e| SearchError::Credential(e.to_string()))?;

        Ok(AccessToken {
            token: token.token.secret().to_string(),
            expires_on: DateTime::from_timestamp(token.expires_on.unix_timestamp(), 0),
        })
    }
}
