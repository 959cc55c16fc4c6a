//! Pinecone data-plane client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::types::{QueryRequest, QueryResponse, VectorRecord};

/// Control-plane endpoint used to look up an index's data-plane host.
pub const DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";
const API_VERSION: &str = "2024-07";

/// Operations the talker needs from a vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite `records` in `namespace`. Returns the upserted count.
    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<u64>;

    /// Run a top-K similarity query.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

/// A handle on one Pinecone index.
///
/// Building the handle does no I/O. When no host is given, the data-plane
/// host is looked up from the control plane on first use and cached.
pub struct PineconeIndex {
    api_key: String,
    index_name: String,
    control_plane_url: String,
    host: OnceCell<String>,
    client: reqwest::Client,
}

impl PineconeIndex {
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            control_plane_url: DEFAULT_CONTROL_PLANE_URL.to_string(),
            host: OnceCell::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Pin the data-plane host, skipping control-plane lookup.
    pub fn with_host(mut self, host: impl AsRef<str>) -> Self {
        self.host = OnceCell::new_with(Some(normalize_host(host.as_ref())));
        self
    }

    pub fn with_control_plane_url(mut self, url: impl AsRef<str>) -> Self {
        self.control_plane_url = normalize_host(url.as_ref());
        self
    }

    /// Share an existing HTTP client (and its connection pool).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Data-plane base URL, resolving it if needed.
    pub async fn host(&self) -> Result<&str> {
        self.host
            .get_or_try_init(|| self.describe_host())
            .await
            .map(String::as_str)
    }

    async fn describe_host(&self) -> Result<String> {
        if self.index_name.is_empty() {
            return Err(IndexError::HostResolution(
                "no host given and no index name to look it up by".to_string(),
            ));
        }

        debug!("Resolving host for index {}", self.index_name);

        let response = self
            .client
            .get(format!("{}/indexes/{}", self.control_plane_url, self.index_name))
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await?;

        let description: IndexDescription = parse_response(response).await?;
        match description.host {
            Some(host) if !host.is_empty() => Ok(normalize_host(&host)),
            _ => Err(IndexError::HostResolution(format!(
                "index {} has no host yet",
                self.index_name
            ))),
        }
    }

    async fn post<B, R>(&self, route: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let host = self.host().await?;
        let response = self
            .client
            .post(format!("{host}{route}"))
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .json(body)
            .send()
            .await?;

        parse_response(response).await
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<u64> {
        let body = UpsertRequest {
            vectors: records,
            namespace,
        };
        let response: UpsertResponse = self.post("/vectors/upsert", &body).await?;
        debug!(
            "Upserted {} record(s) into {}",
            response.upserted_count, self.index_name
        );
        Ok(response.upserted_count)
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let response: QueryResponse = self.post("/query", request).await?;
        debug!(
            "Query on {} returned {} match(es)",
            self.index_name,
            response.matches.len()
        );
        Ok(response)
    }
}

async fn parse_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(IndexError::ApiRequest {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Prefix bare hostnames with `https://` and drop trailing slashes.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: u64,
}

#[derive(Deserialize)]
struct IndexDescription {
    host: Option<String>,
}
