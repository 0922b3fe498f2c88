// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod auth;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod http;
pub mod models;
pub mod utils;

pub use auth::{AccessToken, AuthPolicy, AuthStrategy, DefaultCredential, KeyCredential, TokenCredential};
pub use client::{DocumentsClient, IndexesClient, new_documents_client, new_indexes_client};
pub use config::Config;
pub use demo::{DemoOrchestrator, DemoSettings, IndexStatus, RunReport, Step};
pub use error::{Result, SearchError};
pub use http::{Pipeline, PipelineOptions, Policy, TransportOptions};
pub use models::{
    IndexAction, IndexActionType, IndexBatch, IndexDocumentsResult, SearchDocumentsResult,
    SearchField, SearchFieldDataType, SearchIndex, SearchOptions, SearchResult,
};
