// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod index;
pub mod search_result;

pub use document::{IndexAction, IndexActionType, IndexBatch, IndexDocumentsResult, IndexingResult};
pub use index::{SearchField, SearchFieldDataType, SearchIndex};
pub use search_result::{SearchDocumentsResult, SearchOptions, SearchResult};
