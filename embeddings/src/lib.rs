//! # Embeddings
//!
//! Turns a single piece of text into a dense vector by calling a hosted
//! embedding API.
//!
//! ```text
//! text ──► EmbeddingProvider::embed ──► POST {base_url}/embeddings ──► Embedding
//! ```

pub mod error;
pub mod provider;

pub use error::{EmbeddingError, Result};
pub use provider::{DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, EmbeddingProvider, OpenAIProvider};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
