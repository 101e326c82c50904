//! Error types for the Trackline SDK.

use thiserror::Error;
use trackline_domain::ParseError;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Non-2xx response from the tracker, carrying status code and body.
    /// Always propagated, except for the 404-on-single-story-load case
    /// which `load_story` converts to `None`.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body as received
        body: String,
    },

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// A success response whose body was not valid JSON
    #[error("Invalid JSON response: {0}")]
    Json(String),

    /// A response field could not be converted to its typed form
    #[error("Response parse error: {0}")]
    Parse(#[from] ParseError),

    /// Precondition violation, raised before any network call
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// API token missing or empty
    #[error("Token error: {0}")]
    Token(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Connection(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            SdkError::Connection(format!("Failed to connect: {}", e))
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}
