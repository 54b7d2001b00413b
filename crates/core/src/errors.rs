//! Core error types for the Fintrack application.
//!
//! This module defines storage-agnostic error types. Transport-specific errors
//! (HTTP status codes, JSON decoding, etc.) are converted to these types by the
//! data-access layer.

use std::time::Duration;

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::budgets::BudgetError;
use crate::records::MalformedRecord;
use crate::transactions::TransactionError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the finance tracker.
///
/// Remote failures are wrapped in string form to keep this type independent
/// of the document store that backs the repositories.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Budget error: {0}")]
    Budget(#[from] BudgetError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Malformed record: {0}")]
    Malformed(MalformedRecord),

    #[error("Timed out after {0:?} while fetching data")]
    FetchTimeout(Duration),

    #[error("Failed to fetch data: {0}")]
    Fetch(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Session has expired")]
    SessionExpired,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for repository operations.
///
/// Every detail is a `String`, so the data-access layer can convert
/// transport-specific errors into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested record does not exist or is not owned by the caller.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The store rejected the caller's credentials.
    #[error("Access denied: {0}")]
    Unauthorized(String),

    /// The request could not be completed (network, server error, ...).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// True when the error means the caller asked for something that is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound(_)))
    }
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Decode(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<MalformedRecord> for Error {
    fn from(record: MalformedRecord) -> Self {
        Error::Malformed(record)
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
