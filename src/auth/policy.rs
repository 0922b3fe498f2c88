// file: src/auth/policy.rs
// description: pipeline policy attaching the api-key header or a bearer token to every request
// reference: request interceptor over the http policy chain

use super::credential::{KeyCredential, TokenCredential};
use crate::error::{Result, SearchError};
use crate::http::{Next, Policy};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Request, Response};
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "api-key";

pub struct AuthPolicy {
    mode: AuthMode,
}

enum AuthMode {
    SharedKey(HeaderValue),
    Bearer {
        credential: Arc<dyn TokenCredential>,
        scopes: Vec<String>,
    },
}

impl AuthPolicy {
    /// The key is validated as a header value here, once.
    pub fn shared_key(key: &KeyCredential) -> Result<Self> {
        let mut value = HeaderValue::from_str(key.secret()).map_err(|e| {
            SearchError::InvalidHeader {
                header: API_KEY_HEADER.to_string(),
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);

        Ok(Self {
            mode: AuthMode::SharedKey(value),
        })
    }

    pub fn bearer(credential: Arc<dyn TokenCredential>, scopes: &[&str]) -> Self {
        Self {
            mode: AuthMode::Bearer {
                credential,
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

#[async_trait]
impl Policy for AuthPolicy {
    async fn send(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        match &self.mode {
            AuthMode::SharedKey(value) => {
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(API_KEY_HEADER), value.clone());
            }
            AuthMode::Bearer { credential, scopes } => {
                let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
                let token = credential.get_token(&scopes).await?;

                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.token))
                    .map_err(|e| SearchError::Credential(format!("unusable token: {e}")))?;
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
        }

        next.run(request).await
    }
}
