//! Error types for the sportdash-core library.
//!
//! Extraction itself never fails; these cover the edges around it.

use thiserror::Error;

/// Main error type for the sportdash library.
#[derive(Error, Debug)]
pub enum SportdashError {
    /// Request body could not be turned into parser input.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to parse request bodies.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The body is not JSON, or `text` is not a string.
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// The body has no `text` field.
    #[error("missing required field: text")]
    MissingText,
}

impl RequestError {
    /// HTTP status a handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedBody(_) | Self::MissingText => 400,
        }
    }
}

/// Result type for the sportdash library.
pub type Result<T> = std::result::Result<T, SportdashError>;
