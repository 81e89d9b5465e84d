//! Error types for the content API clients.

use thiserror::Error;

/// Errors that can occur when talking to the text or audio API.
#[derive(Error, Debug)]
pub enum ContentClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// API is offline or unreachable
    #[error("API unreachable: {0}")]
    Unreachable(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ContentClientError> for tilawah_core::TilawahError {
    fn from(err: ContentClientError) -> Self {
        match err {
            ContentClientError::NotFound(what) => Self::not_found("Content", what),
            other => Self::network(other.to_string()),
        }
    }
}

/// Result type for content client operations.
pub type Result<T> = std::result::Result<T, ContentClientError>;
