// file: src/http/policy.rs
// description: request policy trait, chain cursor and the built-in per-request policies
// reference: chain-of-responsibility over reqwest requests

use crate::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// A single stage of the request pipeline.
///
/// Implementations may mutate the request, must call [`Next::run`] to
/// forward it, and should hand back the downstream response untouched.
#[async_trait]
pub trait Policy: Send + Sync {
    async fn send(&self, request: Request, next: Next<'_>) -> Result<Response>;
}

/// Cursor over the remaining policies, terminating in the transport.
///
/// `Next` is `Copy`: a policy may run the rest of the chain more than once,
/// which is how a retry policy re-runs authentication on every attempt.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a reqwest::Client,
    policies: &'a [Arc<dyn Policy>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a reqwest::Client, policies: &'a [Arc<dyn Policy>]) -> Self {
        Self {
            transport,
            policies,
        }
    }

    pub async fn run(self, request: Request) -> Result<Response> {
        match self.policies.split_first() {
            Some((current, rest)) => current.send(request, Next::new(self.transport, rest)).await,
            None => self
                .transport
                .execute(request)
                .await
                .map_err(SearchError::Transport),
        }
    }
}

pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

/// Stamps every request with a fresh client request id unless the caller set one.
#[derive(Debug, Default)]
pub struct RequestIdPolicy;

#[async_trait]
impl Policy for RequestIdPolicy {
    async fn send(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        let header = HeaderName::from_static(CLIENT_REQUEST_ID);
        if !request.headers().contains_key(&header) {
            let id = Uuid::new_v4().to_string();
            let value = HeaderValue::from_str(&id).map_err(|e| SearchError::InvalidHeader {
                header: CLIENT_REQUEST_ID.to_string(),
                message: e.to_string(),
            })?;
            request.headers_mut().insert(header, value);
        }
        next.run(request).await
    }
}

/// Debug-level request/response logging. Headers are never logged.
#[derive(Debug, Default)]
pub struct LoggingPolicy;

#[async_trait]
impl Policy for LoggingPolicy {
    async fn send(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        let request_id = request
            .headers()
            .get(CLIENT_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_default();
        let start = Instant::now();

        debug!(%method, %url, %request_id, "Sending request");

        let result = next.run(request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                elapsed_ms,
                "Received response"
            ),
            Err(e) => debug!(%method, %url, elapsed_ms, error = %e, "Request failed"),
        }

        result
    }
}
