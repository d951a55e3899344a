//! Error types for KetabKit

use thiserror::Error;

/// Errors that can occur while talking to the catalog
#[derive(Debug, Error)]
pub enum KetabError {
    /// Endpoint or base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success HTTP status
    #[error("Error making request: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The API reported a missing record
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    /// The API envelope carried an unexpected code or shape
    #[error("Unknown error: {0}")]
    UnexpectedResponse(String),

    /// Payload could not be decoded
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Book archive could not be read
    #[error("Error during extraction: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Book archive has no JSON entry
    #[error("No JSON file found in downloaded archive")]
    MissingJsonEntry,

    /// Local file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KetabError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            KetabError::Timeout
        } else if err.is_connect() {
            KetabError::ConnectError(err)
        } else {
            KetabError::RequestError(err.to_string())
        }
    }
}
