// file: src/http/pipeline.rs
// description: builds the reqwest transport and the ordered policy chain behind every typed client
// reference: reqwest client builder, per-call/per-retry policy ordering

use super::policy::{LoggingPolicy, Next, Policy, RequestIdPolicy};
use crate::error::{Result, SearchError};
use reqwest::{Method, Request, RequestBuilder, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Transport-level settings. Everything unset keeps the reqwest default.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub proxy: Option<String>,
}

#[derive(Clone, Default)]
pub struct PipelineOptions {
    /// Policies run once per logical call, ahead of authentication. A retry
    /// policy belongs here so that every attempt is re-authenticated.
    pub per_call_policies: Vec<Arc<dyn Policy>>,
    pub transport: TransportOptions,
}

impl PipelineOptions {
    pub fn with_transport(transport: TransportOptions) -> Self {
        Self {
            per_call_policies: Vec::new(),
            transport,
        }
    }
}

/// An assembled transport plus policy chain. Holds no per-call state, so one
/// pipeline can serve concurrent calls.
#[derive(Clone)]
pub struct Pipeline {
    service_name: String,
    service_version: String,
    transport: reqwest::Client,
    policies: Arc<[Arc<dyn Policy>]>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("service_name", &self.service_name)
            .field("service_version", &self.service_version)
            .field("policies", &self.policies.len())
            .finish()
    }
}

impl Pipeline {
    /// Chain order: per-call policies, request id, `auth_policy`, logging,
    /// transport. Performs no network I/O; fails only when the transport
    /// cannot be constructed.
    pub fn build(
        service_name: &str,
        service_version: &str,
        auth_policy: Arc<dyn Policy>,
        options: PipelineOptions,
    ) -> Result<Self> {
        let transport = build_transport(service_name, service_version, &options.transport)?;

        let mut policies = options.per_call_policies;
        policies.push(Arc::new(RequestIdPolicy));
        policies.push(auth_policy);
        policies.push(Arc::new(LoggingPolicy));

        debug!(
            service_name,
            service_version,
            policies = policies.len(),
            "Built request pipeline"
        );

        Ok(Self {
            service_name: service_name.to_string(),
            service_version: service_version.to_string(),
            transport,
            policies: policies.into(),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    /// Starts a request on the pipeline's transport; finish it with
    /// `.build()` and hand it to [`Pipeline::send`].
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.transport.request(method, url)
    }

    pub async fn send(&self, request: Request) -> Result<Response> {
        Next::new(&self.transport, &self.policies).run(request).await
    }
}

fn build_transport(
    service_name: &str,
    service_version: &str,
    options: &TransportOptions,
) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().user_agent(format!("{service_name}/{service_version}"));

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = options.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(proxy) = &options.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy.as_str()).map_err(SearchError::Transport)?);
    }

    builder.build().map_err(SearchError::Transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::policy::CLIENT_REQUEST_ID;
    use async_trait::async_trait;
    use crate::auth::{AccessToken, AuthPolicy, TokenCredential};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Policy for Recording {
        async fn send(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
            self.log.lock().unwrap().push(self.name);
            request
                .headers_mut()
                .insert("x-policy", self.name.parse().unwrap());
            next.run(request).await
        }
    }

    fn recording(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<dyn Policy> {
        Arc::new(Recording {
            name,
            log: Arc::clone(log),
        })
    }

    #[tokio::test]
    async fn test_auth_policy_runs_after_per_call_policies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-policy", "auth"))
            .and(header_exists(CLIENT_REQUEST_ID))
            .and(header("user-agent", "unit-test/1.2.3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let log = Arc::new(Mutex::new(Vec::new()));
        let options = PipelineOptions {
            per_call_policies: vec![recording("per-call", &log)],
            transport: TransportOptions::default(),
        };
        let pipeline =
            Pipeline::build("unit-test", "1.2.3", recording("auth", &log), options).unwrap();

        let request = pipeline
            .request(Method::GET, &format!("{}/ping", server.uri()))
            .build()
            .unwrap();
        let response = pipeline.send(request).await.unwrap();

        assert_eq!(response.status().as_u16(), 204);
        assert_eq!(*log.lock().unwrap(), vec!["per-call", "auth"]);
    }

    struct RetryOnce;

    #[async_trait]
    impl Policy for RetryOnce {
        async fn send(&self, request: Request, next: Next<'_>) -> Result<Response> {
            let retry = request.try_clone().unwrap();
            let response = next.run(request).await?;
            if response.status().is_server_error() {
                return next.run(retry).await;
            }
            Ok(response)
        }
    }

    struct CountingToken(AtomicUsize);

    #[async_trait]
    impl TokenCredential for CountingToken {
        async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AccessToken {
                token: format!("token-{n}"),
                expires_on: None,
            })
        }
    }

    #[tokio::test]
    async fn test_retry_policy_reauthenticates_each_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer token-2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let credential = Arc::new(CountingToken(AtomicUsize::new(0)));
        let auth = AuthPolicy::bearer(credential.clone(), &["scope/.default"]);
        let options = PipelineOptions {
            per_call_policies: vec![Arc::new(RetryOnce)],
            transport: TransportOptions::default(),
        };
        let pipeline = Pipeline::build("unit-test", "0.0.1", Arc::new(auth), options).unwrap();

        let request = pipeline.request(Method::GET, &server.uri()).build().unwrap();
        let response = pipeline.send(request).await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(credential.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pipeline_is_shareable_across_tasks() {
        fn assert_shareable<T: Clone + Send + Sync + 'static>() {}
        assert_shareable::<Pipeline>();
    }

    #[tokio::test]
    async fn test_response_is_returned_unmodified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
            .mount(&server)
            .await;

        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline =
            Pipeline::build("unit-test", "0.0.1", recording("auth", &log), PipelineOptions::default())
                .unwrap();

        let request = pipeline.request(Method::GET, &server.uri()).build().unwrap();
        let response = pipeline.send(request).await.unwrap();

        assert_eq!(response.status().as_u16(), 418);
        assert_eq!(response.text().await.unwrap(), "teapot");
    }

    #[test]
    fn test_invalid_proxy_fails_construction() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let options = PipelineOptions::with_transport(TransportOptions {
            proxy: Some("http://proxy.invalid:99999".to_string()),
            ..TransportOptions::default()
        });

        let result = Pipeline::build("unit-test", "0.0.1", recording("auth", &log), options);
        assert!(matches!(result, Err(SearchError::Transport(_))));
    }

    #[test]
    fn test_debug_reports_identity_and_chain_length() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline =
            Pipeline::build("indexes", "9.9.9", recording("auth", &log), PipelineOptions::default())
                .unwrap();

        assert_eq!(pipeline.service_name(), "indexes");
        assert_eq!(pipeline.service_version(), "9.9.9");
        let rendered = format!("{pipeline:?}");
        assert!(rendered.contains("indexes"));
        assert!(rendered.contains("policies: 3"));
    }
}
