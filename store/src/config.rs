//! Configuration for the vector store talker.

use serde::{Deserialize, Serialize};
use talker_embeddings::{DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL};

use crate::error::{Result, TalkerError};

/// Matches scoring below this are dropped from search results by default.
pub const DEFAULT_MIN_SCORE_THRESHOLD: f64 = 0.8;

/// Default number of strings embedded and upserted at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Configuration for [`crate::VectorStoreTalker`].
///
/// Fixed for the lifetime of the talker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalkerConfig {
    /// API key for the vector index. Required.
    pub vector_store_api_key: String,

    /// API key for the embedding provider. Required.
    pub embedding_api_key: String,

    /// Name of the index to read and write.
    pub index_name: String,

    /// Data-plane host of the index. Looked up by name when absent.
    pub host_url: Option<String>,

    /// Minimum similarity score a search match needs to be returned.
    /// Not range-checked.
    pub min_score_threshold: f64,

    /// Embedding model identifier.
    pub embedding_model: String,

    /// Base URL of the embedding API.
    pub embedding_base_url: String,

    /// Index namespace used for writes and queries.
    pub namespace: String,

    /// Upper bound on concurrent embed+upsert operations while storing.
    pub max_concurrency: usize,

    /// Whether queries ask the index to return stored vector values.
    pub include_values: bool,
}

impl TalkerConfig {
    /// Create a configuration with default values for everything but the
    /// keys and index name.
    pub fn new(
        vector_store_api_key: impl Into<String>,
        embedding_api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            vector_store_api_key: vector_store_api_key.into(),
            embedding_api_key: embedding_api_key.into(),
            index_name: index_name.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// | variable | field |
    /// |---|---|
    /// | `PINECONE_API_KEY` | `vector_store_api_key` |
    /// | `OPENAI_API_KEY` | `embedding_api_key` |
    /// | `PINECONE_INDEX` | `index_name` |
    /// | `PINECONE_HOST` | `host_url` |
    /// | `MIN_SCORE_THRESHOLD` | `min_score_threshold` |
    /// | `EMBEDDING_MODEL` | `embedding_model` |
    ///
    /// Missing keys are left empty and rejected later by
    /// [`crate::VectorStoreTalker::new`].
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::new(
            lookup("PINECONE_API_KEY").unwrap_or_default(),
            lookup("OPENAI_API_KEY").unwrap_or_default(),
            lookup("PINECONE_INDEX").unwrap_or_default(),
        );

        config.host_url = lookup("PINECONE_HOST").filter(|host| !host.is_empty());

        if let Some(raw) = lookup("MIN_SCORE_THRESHOLD") {
            config.min_score_threshold = raw.trim().parse().map_err(|_| {
                TalkerError::Config(format!("MIN_SCORE_THRESHOLD is not a number: {raw}"))
            })?;
        }

        if let Some(model) = lookup("EMBEDDING_MODEL").filter(|m| !m.is_empty()) {
            config.embedding_model = model;
        }

        Ok(config)
    }

    /// Set the index host.
    pub fn with_host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = Some(host_url.into());
        self
    }

    /// Set the relevance threshold.
    pub fn with_min_score_threshold(mut self, threshold: f64) -> Self {
        self.min_score_threshold = threshold;
        self
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Point the embedding client at another OpenAI-compatible API.
    pub fn with_embedding_base_url(mut self, url: impl Into<String>) -> Self {
        self.embedding_base_url = url.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_include_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    /// Check the fields the talker cannot run without.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vector_store_api_key.is_empty() || self.embedding_api_key.is_empty() {
            return Err(TalkerError::Config(
                "vector store API key and embedding API key are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TalkerConfig {
    fn default() -> Self {
        Self {
            vector_store_api_key: String::new(),
            embedding_api_key: String::new(),
            index_name: String::new(),
            host_url: None,
            min_score_threshold: DEFAULT_MIN_SCORE_THRESHOLD,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_base_url: DEFAULT_BASE_URL.to_string(),
            namespace: String::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            include_values: true,
        }
    }
}
