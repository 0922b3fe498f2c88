// file: src/client/documents.rs
// description: typed client for one index's documents (batch index, GET search)
// reference: Azure AI Search REST /indexes('{name}')/docs resource

use super::endpoint::{index_path, join, normalize_endpoint};
use super::response::{ACCEPT_JSON, read_json};
use super::API_VERSION;
use crate::error::Result;
use crate::http::Pipeline;
use crate::models::{IndexBatch, IndexDocumentsResult, SearchDocumentsResult, SearchOptions};
use reqwest::Method;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument, warn};

/// Document operations bound to one endpoint and one index.
#[derive(Debug, Clone)]
pub struct DocumentsClient {
    endpoint: String,
    index_name: String,
    api_version: String,
    pipeline: Pipeline,
}

impl DocumentsClient {
    pub fn new(endpoint: &str, index_name: &str, pipeline: Pipeline) -> Self {
        Self::with_api_version(endpoint, index_name, API_VERSION, pipeline)
    }

    pub fn with_api_version(
        endpoint: &str,
        index_name: &str,
        api_version: &str,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint),
            index_name: index_name.to_string(),
            api_version: api_version.to_string(),
            pipeline,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn docs_url(&self, suffix: &str) -> String {
        join(
            &self.endpoint,
            &format!("{}/docs{suffix}", index_path(&self.index_name)),
        )
    }

    /// `POST .../docs/search.index`. A 207 (some documents rejected) is
    /// still returned as `Ok`; inspect [`IndexDocumentsResult::failed`].
    #[instrument(skip(self, batch), fields(index = %self.index_name, actions = batch.len()))]
    pub async fn index(&self, batch: &IndexBatch) -> Result<IndexDocumentsResult> {
        let request = self
            .pipeline
            .request(Method::POST, &self.docs_url("/search.index"))
            .query(&[("api-version", self.api_version.as_str())])
            .header(ACCEPT, ACCEPT_JSON)
            .json(batch)
            .build()?;

        let response = self.pipeline.send(request).await?;
        let result: IndexDocumentsResult = read_json("index documents", response).await?;

        for failed in result.failed() {
            warn!(
                key = %failed.key,
                status_code = failed.status_code,
                error = failed.error_message.as_deref().unwrap_or_default(),
                "Document rejected"
            );
        }
        debug!(succeeded = result.succeeded(), "Indexing batch accepted");
        Ok(result)
    }

    /// `GET .../docs?search=...`.
    #[instrument(skip(self, options), fields(index = %self.index_name, search = ?options.search_text))]
    pub async fn search_get(&self, options: &SearchOptions) -> Result<SearchDocumentsResult> {
        let request = self
            .pipeline
            .request(Method::GET, &self.docs_url(""))
            .query(&[("api-version", self.api_version.as_str())])
            .query(&options.to_query())
            .header(ACCEPT, ACCEPT_JSON)
            .build()?;

        let response = self.pipeline.send(request).await?;
        let result: SearchDocumentsResult = read_json("search documents", response).await?;
        debug!(results = result.len(), "Search completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccessToken, AuthStrategy, KeyCredential, TokenCredential};
    use crate::error::SearchError;
    use crate::http::PipelineOptions;
    use async_trait::async_trait;
    use serde_json::{Map, json};
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Token;

    #[async_trait]
    impl TokenCredential for Token {
        async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken> {
            Ok(AccessToken {
                token: "aad-token".to_string(),
                expires_on: None,
            })
        }
    }

    fn client(server: &MockServer) -> DocumentsClient {
        let auth = AuthStrategy::Token(Arc::new(Token));
        let pipeline = Pipeline::build(
            "documents-test",
            "0.1.0",
            auth.policy().unwrap(),
            PipelineOptions::default(),
        )
        .unwrap();
        DocumentsClient::new(&server.uri(), "sample-index", pipeline)
    }

    fn sample_doc() -> Map<String, serde_json::Value> {
        let mut doc = Map::new();
        doc.insert("id".to_string(), json!("1"));
        doc.insert("title".to_string(), json!("Hello Azure AI Search"));
        doc
    }

    #[tokio::test]
    async fn test_index_posts_batch_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes('sample-index')/docs/search.index"))
            .and(query_param("api-version", API_VERSION))
            .and(header("authorization", "Bearer aad-token"))
            .and(body_json(json!({
                "value": [{"@search.action": "upload", "id": "1", "title": "Hello Azure AI Search"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"key": "1", "status": true, "errorMessage": null, "statusCode": 201}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .index(&IndexBatch::upload([sample_doc()]))
            .await
            .unwrap();
        assert_eq!(result.succeeded(), 1);
    }

    #[tokio::test]
    async fn test_partial_success_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(207).set_body_json(json!({
                "value": [{"key": "1", "status": false, "errorMessage": "bad", "statusCode": 400}]
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .index(&IndexBatch::upload([sample_doc()]))
            .await
            .unwrap();
        assert_eq!(result.failed().count(), 1);
    }

    #[tokio::test]
    async fn test_search_get_sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes('sample-index')/docs"))
            .and(query_param("api-version", API_VERSION))
            .and(query_param("search", "hello"))
            .and(query_param("$top", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"@search.score": 0.27, "id": "1", "title": "Hello Azure AI Search"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .search_get(&SearchOptions::text("hello").with_top(3))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.results[0].get("id"), Some(&json!("1")));
    }

    #[tokio::test]
    async fn test_concurrent_searches_share_one_client() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes('sample-index')/docs"))
            .and(header("api-key", "query-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
            .expect(8)
            .mount(&server)
            .await;

        let auth = AuthStrategy::SharedKey(KeyCredential::new("query-key"));
        let pipeline =
            Pipeline::build("t", "0", auth.policy().unwrap(), PipelineOptions::default()).unwrap();
        let client = DocumentsClient::new(&server.uri(), "sample-index", pipeline);

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..8 {
            let client = client.clone();
            tasks.spawn(async move {
                client
                    .search_get(&SearchOptions::text(format!("q{i}")))
                    .await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            assert!(joined.unwrap().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_search_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": "Forbidden", "message": "Authorization failed."}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .search_get(&SearchOptions::wildcard())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Service { status: 403, .. }));
        assert!(err.to_string().starts_with("search documents failed with status 403"));
    }

    #[test]
    fn test_binding_keeps_index_name() {
        let auth = AuthStrategy::Token(Arc::new(Token));
        let pipeline =
            Pipeline::build("t", "0", auth.policy().unwrap(), PipelineOptions::default()).unwrap();
        let client = DocumentsClient::new("http://localhost:7700", "books", pipeline);

        assert_eq!(client.endpoint(), "http://localhost:7700");
        assert_eq!(client.index_name(), "books");
    }
}
