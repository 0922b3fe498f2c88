// file: src/demo/orchestrator.rs
// description: linear demo run: ensure index, upload one document, wait, search twice
// reference: orchestrates the sample workflow against the typed clients

use super::progress::settle;
use crate::auth::{AuthStrategy, TokenCredential};
use crate::client::{DocumentsClient, IndexesClient, new_documents_client, new_indexes_client};
use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::http::PipelineOptions;
use crate::models::{
    IndexBatch, IndexDocumentsResult, SearchDocumentsResult, SearchIndex, SearchOptions,
};
use crate::utils::logging::{format_error, format_info, format_step, format_success, format_warning};
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const SAMPLE_DOCUMENT_KEY: &str = "1";
pub const SAMPLE_DOCUMENT_TITLE: &str = "Hello Azure AI Search";

const TOTAL_STEPS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub index_name: String,
    pub query: String,
    pub settle_delay: Duration,
}

impl DemoSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            index_name: config.index_name.clone(),
            query: config.query.clone(),
            settle_delay: config.settle_delay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureIndex,
    UploadDocument,
    WildcardSearch,
    QuerySearch,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::EnsureIndex => "ensure index",
            Step::UploadDocument => "upload document",
            Step::WildcardSearch => "wildcard search",
            Step::QuerySearch => "query search",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Created,
    AlreadyExists,
}

#[derive(Debug)]
pub enum RunReport {
    Completed {
        index: IndexStatus,
        indexed: IndexDocumentsResult,
        wildcard: SearchDocumentsResult,
        query: SearchDocumentsResult,
    },
    Aborted {
        step: Step,
        error: SearchError,
    },
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// The `{id, title}` document uploaded by the demo.
pub fn sample_document() -> Map<String, Value> {
    let mut document = Map::new();
    document.insert("id".to_string(), json!(SAMPLE_DOCUMENT_KEY));
    document.insert("title".to_string(), json!(SAMPLE_DOCUMENT_TITLE));
    document
}

pub struct DemoOrchestrator {
    indexes: IndexesClient,
    documents: DocumentsClient,
    settings: DemoSettings,
}

impl DemoOrchestrator {
    pub fn new(indexes: IndexesClient, documents: DocumentsClient, settings: DemoSettings) -> Self {
        Self {
            indexes,
            documents,
            settings,
        }
    }

    /// Binds both clients to the same `auth`. Fails with a configuration
    /// error, before any network call, when no endpoint is configured.
    pub fn from_config(config: &Config, auth: &AuthStrategy) -> Result<Self> {
        let endpoint = config.require_endpoint()?;

        let indexes = new_indexes_client(
            endpoint,
            &config.api_version,
            auth,
            PipelineOptions::with_transport(config.transport_options()),
        )?;
        let documents = new_documents_client(
            endpoint,
            &config.index_name,
            &config.api_version,
            auth,
            PipelineOptions::with_transport(config.transport_options()),
        )?;

        Ok(Self::new(indexes, documents, DemoSettings::from_config(config)))
    }

    /// Selects the auth strategy once, verifies a token credential with a
    /// preflight request, then builds the clients.
    pub async fn bootstrap<F>(config: &Config, token_source: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Arc<dyn TokenCredential>>,
    {
        config.require_endpoint()?;

        let auth = AuthStrategy::select(config.api_key.as_deref(), token_source)?;
        auth.log_selection();
        match &auth {
            AuthStrategy::SharedKey(_) => println!("{}", format_info("Using API key authentication.")),
            AuthStrategy::Token(_) => println!(
                "{}",
                format_info("No API key provided. Falling back to the default credential chain.")
            ),
        }

        auth.preflight().await?;
        Self::from_config(config, &auth)
    }

    pub fn settings(&self) -> &DemoSettings {
        &self.settings
    }

    pub fn indexes(&self) -> &IndexesClient {
        &self.indexes
    }

    pub fn documents(&self) -> &DocumentsClient {
        &self.documents
    }

    /// Create, falling back to a lookup. The create error is returned when
    /// the index cannot be found either.
    pub async fn ensure_index(&self, definition: &SearchIndex) -> Result<IndexStatus> {
        let create_error = match self.indexes.create(definition).await {
            Ok(_) => return Ok(IndexStatus::Created),
            Err(e) => e,
        };

        match self.indexes.get(&definition.name).await {
            Ok(_) => {
                info!(index = %definition.name, error = %create_error, "Create failed but index exists");
                Ok(IndexStatus::AlreadyExists)
            }
            Err(get_error) => {
                warn!(index = %definition.name, error = %get_error, "Index lookup after failed create also failed");
                Err(create_error)
            }
        }
    }

    pub async fn upload_sample(&self) -> Result<IndexDocumentsResult> {
        self.documents
            .index(&IndexBatch::upload([sample_document()]))
            .await
    }

    pub async fn search(&self, text: &str) -> Result<SearchDocumentsResult> {
        self.documents.search_get(&SearchOptions::text(text)).await
    }

    /// Runs all four steps, printing progress. The first failing step ends
    /// the run and is reported in the returned value.
    pub async fn run(&self) -> RunReport {
        let index_name = self.settings.index_name.as_str();

        println!("{}", format_step(1, TOTAL_STEPS, &format!("Ensuring index '{index_name}'")));
        let index = match self.ensure_index(&SearchIndex::sample(index_name)).await {
            Ok(IndexStatus::Created) => {
                println!("{}", format_success(&format!("Created index '{index_name}'.")));
                IndexStatus::Created
            }
            Ok(IndexStatus::AlreadyExists) => {
                println!(
                    "{}",
                    format_info(&format!("Index '{index_name}' already exists, continuing."))
                );
                IndexStatus::AlreadyExists
            }
            Err(error) => {
                println!(
                    "{}",
                    format_error(&format!("Failed to create index and it does not exist: {error}"))
                );
                return RunReport::Aborted {
                    step: Step::EnsureIndex,
                    error,
                };
            }
        };

        println!("{}", format_step(2, TOTAL_STEPS, "Indexing a sample document"));
        let indexed = match self.upload_sample().await {
            Ok(result) => result,
            Err(error) => {
                println!("{}", format_error(&format!("Indexing failed: {error}")));
                return RunReport::Aborted {
                    step: Step::UploadDocument,
                    error,
                };
            }
        };
        if indexed.failed().next().is_some() {
            println!(
                "{}",
                format_warning("Some documents were rejected by the service.")
            );
        }
        println!("{}", format_info("Submitted indexing batch. Waiting for propagation..."));
        settle(self.settings.settle_delay, "Waiting for propagation").await;

        println!("{}", format_step(3, TOTAL_STEPS, "Wildcard search"));
        let wildcard = match self.search("*").await {
            Ok(results) => results,
            Err(error) => {
                println!("{}", format_error(&format!("Wildcard search failed: {error}")));
                return RunReport::Aborted {
                    step: Step::WildcardSearch,
                    error,
                };
            }
        };
        print_results("Wildcard search", "Doc", &wildcard);

        let query_text = self.settings.query.as_str();
        println!("{}", format_step(4, TOTAL_STEPS, &format!("Searching for '{query_text}'")));
        let query = match self.search(query_text).await {
            Ok(results) => results,
            Err(error) => {
                println!("{}", format_error(&format!("Query search failed: {error}")));
                return RunReport::Aborted {
                    step: Step::QuerySearch,
                    error,
                };
            }
        };
        print_results(&format!("Query search ('{query_text}')"), "Match", &query);

        RunReport::Completed {
            index,
            indexed,
            wildcard,
            query,
        }
    }
}

/// Status line for a failed [`DemoOrchestrator::bootstrap`]. Only credential
/// failures are reported as authentication problems.
pub fn setup_failure_message(error: &SearchError) -> String {
    if error.is_credential() {
        format!("Failed to set up authentication: {error}")
    } else {
        format!("Failed to set up clients: {error}")
    }
}

pub fn print_results(label: &str, item: &str, results: &SearchDocumentsResult) {
    println!(
        "{}",
        format_success(&format!("{label} returned {} result(s).", results.len()))
    );
    for result in &results.results {
        if !result.document.is_empty() {
            println!("  {item}: {}", result.format_document());
        }
    }
}
