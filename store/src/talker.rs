//! The vector store talker: store text by meaning, search it back.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::{StreamExt, future, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use talker_embeddings::{Embedding, EmbeddingProvider, OpenAIProvider};
use talker_vector_index::{PineconeIndex, QueryRequest, VectorIndex, VectorRecord, retain_relevant};

use crate::config::TalkerConfig;
use crate::error::{Result, TalkerError};

/// Number of matches requested when the caller does not say.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Parameters for [`VectorStoreTalker::search_for_complaints`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchParams {
    /// Item the complaints are about. Used to build the query vector.
    pub item_name: Option<String>,

    /// Free-text description. Accepted, currently not used for the query.
    pub query_string: Option<String>,

    /// Top-K requested from the index.
    pub max_results: usize,
}

impl SearchParams {
    /// Search for complaints about `item_name`.
    pub fn item(item_name: impl Into<String>) -> Self {
        Self {
            item_name: Some(item_name.into()),
            ..Self::default()
        }
    }

    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            item_name: None,
            query_string: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Result of a complaint search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSearch {
    pub item_name: String,

    /// Ids of the relevant matches, in index ranking order. Ids are the
    /// stored strings themselves.
    #[serde(rename = "complains")]
    pub complaints: Vec<String>,
}

/// Facade over an embedding provider and a vector index.
///
/// ```rust,ignore
/// let talker = VectorStoreTalker::new(TalkerConfig::from_env()?)?;
/// talker.store_strings(&["zipper broke after a week"]).await?;
/// let found = talker.search_for_complaints(SearchParams::item("jacket")).await?;
/// ```
pub struct VectorStoreTalker {
    config: TalkerConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl VectorStoreTalker {
    /// Build a talker backed by OpenAI embeddings and a Pinecone index.
    ///
    /// Fails if either API key is empty. Does not touch the network.
    pub fn new(config: TalkerConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::new();

        let embedder = OpenAIProvider::new(&config.embedding_api_key, &config.embedding_model)
            .with_base_url(&config.embedding_base_url)
            .with_client(client.clone());

        let mut index =
            PineconeIndex::new(&config.vector_store_api_key, &config.index_name).with_client(client);
        if let Some(host) = config.host_url.as_deref().filter(|h| !h.is_empty()) {
            index = index.with_host(host);
        }

        Ok(Self {
            config,
            embedder: Arc::new(embedder),
            index: Arc::new(index),
        })
    }

    /// Build a talker over caller-supplied clients.
    pub fn with_clients(
        config: TalkerConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            embedder,
            index,
        })
    }

    pub fn config(&self) -> &TalkerConfig {
        &self.config
    }

    /// Embed one string. Errors are logged and returned unchanged.
    pub async fn embed_string_to_vector(&self, text: &str) -> Result<Embedding> {
        self.embedder.embed(text).await.map_err(|err| {
            error!("Error generating embedding: {err}");
            TalkerError::from(err)
        })
    }

    /// Embed every string and upsert it into the index keyed by its own text.
    ///
    /// One embedding request and one upsert request per string, at most
    /// `max_concurrency` strings in flight. After the first failure no new
    /// strings are started, but those already in flight run to completion;
    /// the call then fails with that first error. Records already written
    /// stay in the index.
    pub async fn store_strings<S>(&self, strings: &[S]) -> Result<()>
    where
        S: AsRef<str> + Sync,
    {
        if strings.is_empty() {
            return Err(TalkerError::InvalidInput(
                "input must be a non-empty list of strings".to_string(),
            ));
        }

        let limit = self.config.max_concurrency.max(1);
        let failed = AtomicBool::new(false);
        let mut first_error = None;

        let mut outcomes = stream::iter(strings.iter().map(AsRef::<str>::as_ref))
            .take_while(|_| future::ready(!failed.load(Ordering::Acquire)))
            .map(|text| self.store_one(text))
            .buffer_unordered(limit);

        while let Some(outcome) = outcomes.next().await {
            if let Err(err) = outcome {
                failed.store(true, Ordering::Release);
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            None => {
                info!(
                    "Stored {} string(s) in index {}",
                    strings.len(),
                    self.config.index_name
                );
                Ok(())
            }
            Some(err) => {
                error!("Error storing strings in index: {err}");
                Err(err)
            }
        }
    }

    async fn store_one(&self, text: &str) -> Result<()> {
        let values = self.embed_string_to_vector(text).await?;
        let record = VectorRecord::from_text(text, values);
        self.index.upsert(&self.config.namespace, &[record]).await?;
        debug!("Upserted record for {text:?}");
        Ok(())
    }

    /// Find stored strings relevant to an item.
    ///
    /// Returns `Ok(None)` without any request when neither `item_name` nor
    /// `query_string` is given. Only `item_name` feeds the query vector, so a
    /// call with only `query_string` fails with `InvalidInput` before any
    /// request is made.
    pub async fn search_for_complaints(
        &self,
        params: SearchParams,
    ) -> Result<Option<ComplaintSearch>> {
        let SearchParams {
            item_name,
            query_string,
            max_results,
        } = params;

        let item_name = item_name.filter(|name| !name.is_empty());
        let has_query_string = query_string.as_deref().is_some_and(|q| !q.is_empty());

        let Some(item_name) = item_name else {
            if has_query_string {
                return Err(TalkerError::InvalidInput(
                    "an item name is required to build the search query".to_string(),
                ));
            }
            return Ok(None);
        };

        let vector = self.embed_string_to_vector(&item_name).await?;
        let request = QueryRequest::new(vector, max_results)
            .with_namespace(&self.config.namespace)
            .with_values(self.config.include_values);
        let response = self.index.query(&request).await?;

        debug!(
            "Query for {item_name:?} returned {} match(es)",
            response.matches.len()
        );

        let complaints = retain_relevant(response.matches, self.config.min_score_threshold)
            .into_iter()
            .map(|m| m.id)
            .collect();

        Ok(Some(ComplaintSearch {
            item_name,
            complaints,
        }))
    }
}
