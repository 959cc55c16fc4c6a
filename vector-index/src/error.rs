//! Error types for the vector index client.

use thiserror::Error;

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors returned by the vector index client.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index answered with a non-success status.
    #[error("index request failed with status {status}: {body}")]
    ApiRequest { status: u16, body: String },

    /// The data-plane host could not be determined.
    #[error("could not resolve index host: {0}")]
    HostResolution(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
