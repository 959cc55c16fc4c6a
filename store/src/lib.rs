//! # Vector Store Talker
//!
//! Stores short texts in a managed vector index and finds them again by
//! meaning.
//!
//! ```text
//!   store_strings(["..."])            search_for_complaints(item)
//!          │                                   │
//!          ▼                                   ▼
//!   EmbeddingProvider::embed ◄─────── EmbeddingProvider::embed
//!          │                                   │
//!          ▼                                   ▼
//!   VectorIndex::upsert               VectorIndex::query
//!   (one record per string)                    │
//!                                              ▼
//!                                     retain_relevant(min score)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use talker_store::{SearchParams, TalkerConfig, VectorStoreTalker};
//!
//! let config = TalkerConfig::new(pinecone_key, openai_key, "complaints")
//!     .with_host_url("complaints-abc123.svc.us-east1-gcp.pinecone.io");
//! let talker = VectorStoreTalker::new(config)?;
//!
//! talker.store_strings(&["the zipper broke after a week"]).await?;
//! let found = talker.search_for_complaints(SearchParams::item("jacket")).await?;
//! ```

pub mod config;
pub mod error;
pub mod talker;

pub use config::TalkerConfig;
pub use error::{Result, TalkerError};
pub use talker::{ComplaintSearch, DEFAULT_MAX_RESULTS, SearchParams, VectorStoreTalker};

// Re-export from dependencies for convenience
pub use talker_embeddings::{Embedding, EmbeddingProvider, OpenAIProvider};
pub use talker_vector_index::{PineconeIndex, ScoredMatch, VectorIndex, VectorRecord};
