// file: src/client/indexes.rs
// description: typed client for index management (create, get, delete)
// reference: Azure AI Search REST /indexes resource

use super::endpoint::{index_path, join, normalize_endpoint};
use super::response::{ACCEPT_JSON, ensure_success, read_json};
use super::API_VERSION;
use crate::error::Result;
use crate::http::Pipeline;
use crate::models::SearchIndex;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument};

/// Index management bound to one service endpoint. All fields are fixed at
/// construction; clone it to share.
#[derive(Debug, Clone)]
pub struct IndexesClient {
    endpoint: String,
    api_version: String,
    pipeline: Pipeline,
}

impl IndexesClient {
    pub fn new(endpoint: &str, pipeline: Pipeline) -> Self {
        Self::with_api_version(endpoint, API_VERSION, pipeline)
    }

    pub fn with_api_version(endpoint: &str, api_version: &str, pipeline: Pipeline) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint),
            api_version: api_version.to_string(),
            pipeline,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `POST /indexes`. Fails with the service's error if the index exists.
    #[instrument(skip(self, index), fields(index = %index.name))]
    pub async fn create(&self, index: &SearchIndex) -> Result<SearchIndex> {
        let request = self
            .pipeline
            .request(Method::POST, &join(&self.endpoint, "/indexes"))
            .query(&[("api-version", self.api_version.as_str())])
            .header(ACCEPT, ACCEPT_JSON)
            .json(index)
            .build()?;

        let response = self.pipeline.send(request).await?;
        let created: SearchIndex = read_json("create index", response).await?;
        debug!(fields = created.fields.len(), "Index created");
        Ok(created)
    }

    /// `GET /indexes('{name}')`.
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<SearchIndex> {
        let request = self
            .pipeline
            .request(Method::GET, &join(&self.endpoint, &index_path(name)))
            .query(&[("api-version", self.api_version.as_str())])
            .header(ACCEPT, ACCEPT_JSON)
            .build()?;

        let response = self.pipeline.send(request).await?;
        read_json("get index", response).await
    }

    /// `DELETE /indexes('{name}')`. A missing index counts as deleted.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        let request = self
            .pipeline
            .request(Method::DELETE, &join(&self.endpoint, &index_path(name)))
            .query(&[("api-version", self.api_version.as_str())])
            .header(ACCEPT, ACCEPT_JSON)
            .build()?;

        let response = self.pipeline.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Index already absent");
            return Ok(());
        }
        ensure_success("delete index", response).await?;
        Ok(())
    }
}
