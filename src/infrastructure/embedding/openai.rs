//! OpenAI embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{EmbeddingProvider, RagError};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI embeddings API adapter
#[derive(Debug)]
pub struct OpenAiEmbeddings<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddings<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddings<C> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        let json = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await?;

        let response: EmbeddingsResponse = serde_json::from_value(json).map_err(|e| {
            RagError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RagError::provider("openai", "No embedding in response"))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    #[tokio::test]
    async fn test_embed_parses_vector() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/embeddings",
            serde_json::json!({
                "data": [{ "embedding": [0.1, 0.2, 0.3], "index": 0 }],
                "model": "text-embedding-ada-002",
            }),
        );
        let provider = OpenAiEmbeddings::new(client, "sk-test", "text-embedding-ada-002");

        let vector = provider.embed("hello").await.unwrap();

        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_sends_model_and_input() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/embeddings",
            serde_json::json!({ "data": [{ "embedding": [0.0] }] }),
        );
        let provider = OpenAiEmbeddings::new(client, "sk-test", "text-embedding-ada-002");

        provider.embed("some text").await.unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1["model"], "text-embedding-ada-002");
        assert_eq!(requests[0].1["input"], "some text");
    }

    #[tokio::test]
    async fn test_empty_data_is_provider_error() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/embeddings",
            serde_json::json!({ "data": [] }),
        );
        let provider = OpenAiEmbeddings::new(client, "sk-test", "text-embedding-ada-002");

        assert!(provider.embed("hello").await.is_err());
    }
}
