//! # Vector Index
//!
//! Client for a managed vector index (Pinecone data plane).
//!
//! The crate only speaks the two operations the talker needs: upserting
//! records and running top-K similarity queries. Matches can then be
//! narrowed with [`retain_relevant`].

pub mod error;
pub mod pinecone;
pub mod relevance;
pub mod types;

pub use error::{IndexError, Result};
pub use pinecone::{DEFAULT_CONTROL_PLANE_URL, PineconeIndex, VectorIndex};
pub use relevance::retain_relevant;
pub use types::{QueryRequest, QueryResponse, RecordMetadata, ScoredMatch, VectorRecord};
