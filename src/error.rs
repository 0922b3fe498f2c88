// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The identity provider could not produce a token. Raised before any
    /// request reaches the search service.
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header value for {header}: {message}")]
    InvalidHeader { header: String, message: String },

    /// Non-success status returned by the search service.
    #[error("{operation} failed with status {status}{}: {message}", code_suffix(.code))]
    Service {
        operation: &'static str,
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl SearchError {
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential(_))
    }

    /// HTTP status reported by the service, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_includes_code() {
        let err = SearchError::Service {
            operation: "create index",
            status: 409,
            code: Some("ResourceNameAlreadyInUse".to_string()),
            message: "index exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "create index failed with status 409 (ResourceNameAlreadyInUse): index exists"
        );
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_credential());
    }

    #[test]
    fn test_service_error_display_without_code() {
        let err = SearchError::Service {
            operation: "search documents",
            status: 500,
            code: None,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "search documents failed with status 500: boom");
    }

    #[test]
    fn test_credential_error_is_distinguishable() {
        let err = SearchError::Credential("no identity".to_string());
        assert!(err.is_credential());
        assert_eq!(err.status(), None);
    }
}
