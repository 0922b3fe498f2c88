// file: src/models/search_result.rs
// description: search request options and scored search results
// reference: Azure AI Search GET docs query parameters and response body

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Query parameters for a GET search. Unset options are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub search_text: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub filter: Option<String>,
    pub select: Vec<String>,
    pub include_total_count: bool,
}

impl SearchOptions {
    pub fn text(search_text: impl Into<String>) -> Self {
        Self {
            search_text: Some(search_text.into()),
            ..Self::default()
        }
    }

    pub fn wildcard() -> Self {
        Self::text("*")
    }

    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_total_count(mut self) -> Self {
        self.include_total_count = true;
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(text) = &self.search_text {
            query.push(("search", text.clone()));
        }
        if let Some(top) = self.top {
            query.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            query.push(("$skip", skip.to_string()));
        }
        if let Some(filter) = &self.filter {
            query.push(("$filter", filter.clone()));
        }
        if !self.select.is_empty() {
            query.push(("$select", self.select.join(",")));
        }
        if self.include_total_count {
            query.push(("$count", "true".to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "@search.score")]
    pub score: f64,

    #[serde(
        rename = "@search.highlights",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub highlights: Option<HashMap<String, Vec<String>>>,

    /// Retrievable document properties.
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

impl SearchResult {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.document.get(field)
    }

    /// Document properties as compact JSON, for display.
    pub fn format_document(&self) -> String {
        Value::Object(self.document.clone()).to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocumentsResult {
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(rename = "value")]
    pub results: Vec<SearchResult>,
}

impl SearchDocumentsResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
