//! Request body handling for the parse endpoints.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// JSON body accepted by the parse endpoints: `{"text": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl ParseRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Decode a request body and return the text to parse.
    ///
    /// An empty string is valid input; only a missing or `null` field is
    /// rejected.
    pub fn from_json(body: &str) -> Result<String, RequestError> {
        let request: Self = serde_json::from_str(body).map_err(RequestError::MalformedBody)?;
        request.text.ok_or(RequestError::MissingText)
    }
}
