//! Error types for the vector store talker.

use thiserror::Error;

/// Result type alias for talker operations.
pub type Result<T> = std::result::Result<T, TalkerError>;

/// Errors that can occur in the talker.
#[derive(Error, Debug)]
pub enum TalkerError {
    /// Missing or unusable configuration, raised at construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller passed input the operation cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Embedding provider error.
    #[error("embedding error: {0}")]
    Embedding(#[from] talker_embeddings::EmbeddingError),

    /// Vector index error.
    #[error("index error: {0}")]
    Index(#[from] talker_vector_index::IndexError),
}
