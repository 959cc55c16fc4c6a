//! Embedding providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Model used when the caller does not pick one.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Base URL of the OpenAI REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Generate an embedding for the given text.
    ///
    /// Empty text is forwarded as-is; the provider decides whether it is valid.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// OpenAI embedding provider.
///
/// Issues one `POST {base_url}/embeddings` per call and returns the first
/// embedding of the response.
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAIProvider {
    /// Create a provider for `model` authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            model: model.into(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Share an existing HTTP client (and its connection pool).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        if self.api_key.is_empty() {
            return Err(EmbeddingError::ProviderNotConfigured);
        }

        debug!("Generating embedding with model: {}", self.model);

        let body = OpenAIEmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let result: OpenAIEmbeddingResponse = serde_json::from_str(&raw)?;

        let embedding = result
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding in response".to_string()))?
            .embedding;

        debug!("Generated embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }
}

#[derive(Debug, Serialize)]
struct OpenAIEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenAIProvider {
        OpenAIProvider::new("sk-test", DEFAULT_EMBEDDING_MODEL).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_embed_returns_first_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "text-embedding-ada-002",
                "input": "broken zipper"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [
                    {"object": "embedding", "index": 0, "embedding": [0.25, -0.5, 1.0]},
                    {"object": "embedding", "index": 1, "embedding": [9.0, 9.0, 9.0]}
                ],
                "model": "text-embedding-ada-002",
                "usage": {"prompt_tokens": 2, "total_tokens": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let embedding = provider(&server).embed("broken zipper").await.unwrap();
        assert_eq!(embedding, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_empty_text_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_json(json!({"model": "text-embedding-ada-002", "input": ""})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"embedding": [0.0]}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(provider(&server).embed("").await.unwrap(), vec![0.0]);
    }

    #[tokio::test]
    async fn test_empty_data_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let err = provider(&server).embed("x").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "?"})))
            .mount(&server)
            .await;

        let err = provider(&server).embed("x").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = provider(&server).embed("x").await.unwrap_err();
        match err {
            EmbeddingError::ApiRequest { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider(&server).embed("x").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::RateLimited {
                retry_after_secs: 7
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new("", DEFAULT_EMBEDDING_MODEL).with_base_url(server.uri());
        let err = provider.embed("x").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::ProviderNotConfigured));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenAIProvider::new("k", "m").with_base_url("http://localhost:1234/v1/");
        assert_eq!(provider.base_url(), "http://localhost:1234/v1");
        assert_eq!(provider.model(), "m");
        assert_eq!(provider.name(), "openai");
    }
}
