// file: src/client/mod.rs
// description: typed search clients and the factories that pair them with an authenticated pipeline
// reference: internal module structure

pub mod documents;
pub mod endpoint;
pub mod indexes;
mod response;

pub use documents::DocumentsClient;
pub use endpoint::normalize_endpoint;
pub use indexes::IndexesClient;

use crate::auth::AuthStrategy;
use crate::error::Result;
use crate::http::{Pipeline, PipelineOptions};

/// REST API version the clients speak unless told otherwise.
pub const API_VERSION: &str = "2025-09-01";

pub const INDEXES_SERVICE_NAME: &str = "azsearch-indexes";
pub const DOCUMENTS_SERVICE_NAME: &str = "azsearch-documents";
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds a dedicated pipeline authenticated by `auth` and binds it to an
/// [`IndexesClient`].
pub fn new_indexes_client(
    endpoint: &str,
    api_version: &str,
    auth: &AuthStrategy,
    options: PipelineOptions,
) -> Result<IndexesClient> {
    let pipeline = Pipeline::build(INDEXES_SERVICE_NAME, MODULE_VERSION, auth.policy()?, options)?;
    Ok(IndexesClient::with_api_version(endpoint, api_version, pipeline))
}

/// Builds a dedicated pipeline authenticated by `auth` and binds it to a
/// [`DocumentsClient`] for `index_name`.
pub fn new_documents_client(
    endpoint: &str,
    index_name: &str,
    api_version: &str,
    auth: &AuthStrategy,
    options: PipelineOptions,
) -> Result<DocumentsClient> {
    let pipeline = Pipeline::build(DOCUMENTS_SERVICE_NAME, MODULE_VERSION, auth.policy()?, options)?;
    Ok(DocumentsClient::with_api_version(
        endpoint,
        index_name,
        api_version,
        pipeline,
    ))
}
