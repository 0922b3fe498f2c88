// file: src/models/document.rs
// description: index batch payloads and per-document indexing results
// reference: Azure AI Search docs/search.index request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexActionType {
    Upload,
    Merge,
    MergeOrUpload,
    Delete,
}

/// One document plus what to do with it. Document properties are flattened
/// next to `@search.action` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAction {
    #[serde(rename = "@search.action")]
    pub action_type: IndexActionType,
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

impl IndexAction {
    pub fn new(action_type: IndexActionType, document: Map<String, Value>) -> Self {
        Self {
            action_type,
            document,
        }
    }

    pub fn upload(document: Map<String, Value>) -> Self {
        Self::new(IndexActionType::Upload, document)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexBatch {
    #[serde(rename = "value")]
    pub actions: Vec<IndexAction>,
}

impl IndexBatch {
    pub fn new(actions: Vec<IndexAction>) -> Self {
        Self { actions }
    }

    pub fn upload(documents: impl IntoIterator<Item = Map<String, Value>>) -> Self {
        Self::new(documents.into_iter().map(IndexAction::upload).collect())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingResult {
    pub key: String,
    pub status: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    pub status_code: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDocumentsResult {
    #[serde(rename = "value")]
    pub results: Vec<IndexingResult>,
}

impl IndexDocumentsResult {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.status).count()
    }

    /// Per-document failures; the service reports these with a 207 status.
    pub fn failed(&self) -> impl Iterator<Item = &IndexingResult> {
        self.results.iter().filter(|r| !r.status)
    }
}
