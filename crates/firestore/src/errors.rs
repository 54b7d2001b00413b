//! Transport errors for the REST clients.
//!
//! These errors are internal to this crate and are converted to
//! `fintrack_core::Error` before being returned to callers.

use fintrack_core::errors::{Error, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<FirestoreError> for Error {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::NotFound(path) => Error::Store(StoreError::NotFound(path)),
            FirestoreError::PermissionDenied(msg) => Error::Store(StoreError::Unauthorized(msg)),
            FirestoreError::Decode(msg) => Error::Store(StoreError::Decode(msg)),
            other => Error::Store(StoreError::RequestFailed(other.to_string())),
        }
    }
}

/// Error payload returned by Google REST APIs.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct GoogleErrorResponse {
    pub error: GoogleErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct GoogleErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Maps a non-success HTTP response to a [`FirestoreError`].
pub(crate) fn error_for_status(status: reqwest::StatusCode, body: &str, path: &str) -> FirestoreError {
    let message = serde_json::from_str::<GoogleErrorResponse>(body)
        .map(|e| match e.error.status {
            Some(code) if !code.is_empty() => format!("{}: {}", code, e.error.message),
            _ => e.error.message,
        })
        .unwrap_or_else(|_| body.chars().take(200).collect());

    match status.as_u16() {
        404 => FirestoreError::NotFound(path.to_string()),
        401 | 403 => FirestoreError::PermissionDenied(message),
        code => FirestoreError::Api {
            status: code,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        let err = error_for_status(StatusCode::FORBIDDEN, body, "budgets/b1");
        assert!(matches!(err, FirestoreError::PermissionDenied(ref m) if m.starts_with("PERMISSION_DENIED")));

        let err: Error = error_for_status(StatusCode::NOT_FOUND, "", "budgets/b1").into();
        assert!(err.is_not_found());

        let err = error_for_status(StatusCode::SERVICE_UNAVAILABLE, "upstream down", "x");
        assert!(matches!(err, FirestoreError::Api { status: 503, ref message } if message == "upstream down"));
    }
}
