// file: src/client/response.rs
// description: maps service responses to typed bodies or SearchError::Service
// reference: Azure AI Search error envelope {"error": {"code", "message"}}

use crate::error::{Result, SearchError};
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub(crate) const ACCEPT_JSON: &str = "application/json;odata.metadata=minimal";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> Result<T> {
    let response = ensure_success(operation, response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) async fn ensure_success(operation: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(service_error(operation, status.as_u16(), &text))
}

pub(crate) fn service_error(operation: &'static str, status: u16, body: &str) -> SearchError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope.error.code,
            envelope.error.message.unwrap_or_default(),
        ),
        Err(_) if body.trim().is_empty() => (None, "no response body".to_string()),
        Err(_) => (None, body.trim().to_string()),
    };

    SearchError::Service {
        operation,
        status,
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_error_envelope() {
        let err = service_error(
            "create index",
            400,
            r#"{"error":{"code":"InvalidRequestParameter","message":"The index name is invalid."}}"#,
        );

        match err {
            SearchError::Service {
                operation,
                status,
                code,
                message,
            } => {
                assert_eq!(operation, "create index");
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("InvalidRequestParameter"));
                assert_eq!(message, "The index name is invalid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        let plain = service_error("get index", 502, "Bad Gateway\n");
        assert_eq!(plain.to_string(), "get index failed with status 502: Bad Gateway");

        let empty = service_error("get index", 404, "");
        assert_eq!(empty.to_string(), "get index failed with status 404: no response body");
    }
}
