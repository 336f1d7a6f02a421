//! Elasticsearch-backed vector index

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{Chunk, EmbeddingProvider, RagError, ScoredChunk, VectorIndex};
use crate::infrastructure::http_client::HttpClientTrait;

/// Vector index backed by an Elasticsearch dense-vector index.
///
/// Writes use `?refresh=true` so stored chunks are visible to searches
/// before `store` returns. Search uses kNN with cosine similarity; the
/// `_score` Elasticsearch reports for cosine is `(1 + cos) / 2`, i.e. the
/// normalized `[0, 1]` scale the retrieval threshold is configured against.
#[derive(Debug)]
pub struct ElasticsearchIndex<C: HttpClientTrait> {
    client: C,
    base_url: String,
    index_name: String,
    embeddings: Arc<dyn EmbeddingProvider>,
    auth_header: Option<String>,
}

impl<C: HttpClientTrait> ElasticsearchIndex<C> {
    pub fn new(
        client: C,
        base_url: impl Into<String>,
        index_name: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index_name: index_name.into(),
            embeddings,
            auth_header: None,
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        self.auth_header = Some(format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        ));
        self
    }

    fn doc_url(&self, id: Uuid) -> String {
        format!(
            "{}/{}/_doc/{}?refresh=true",
            self.base_url, self.index_name, id
        )
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index_name)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }

        headers
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_score", default)]
    score: f32,
    #[serde(rename = "_source")]
    source: HitSource,
}

#[derive(Debug, Deserialize)]
struct HitSource {
    text: String,
    #[serde(default)]
    metadata: HashMap<String, serde_json::Value>,
}

#[async_trait]
impl<C: HttpClientTrait> VectorIndex for ElasticsearchIndex<C> {
    async fn store(&self, chunks: Vec<Chunk>) -> Result<usize, RagError> {
        let count = chunks.len();

        for chunk in chunks {
            let vector = self.embeddings.embed(chunk.text()).await?;
            let body = serde_json::json!({
                "text": chunk.text(),
                "metadata": chunk.metadata(),
                "embedding": vector,
            });

            self.client
                .post_json(&self.doc_url(Uuid::new_v4()), self.headers(), &body)
                .await
                .map_err(|e| RagError::index_unavailable(e.to_string()))?;
        }

        tracing::debug!(index = %self.index_name, count, "chunks stored");
        Ok(count)
    }

    async fn search(
        &self,
        query: &str,
        k: usize,
        threshold: f32,
    ) -> Result<Vec<ScoredChunk>, RagError> {
        let query_vector = self.embeddings.embed(query).await?;
        let body = serde_json::json!({
            "knn": {
                "field": "embedding",
                "query_vector": query_vector,
                "k": k,
                "num_candidates": (k * 10).max(50),
            },
            "size": k,
            "_source": ["text", "metadata"],
        });

        let json = self
            .client
            .post_json(&self.search_url(), self.headers(), &body)
            .await
            .map_err(|e| RagError::index_unavailable(e.to_string()))?;

        let response: SearchResponse = serde_json::from_value(json)
            .map_err(|e| RagError::index_unavailable(format!("Unexpected response: {}", e)))?;

        Ok(response
            .hits
            .hits
            .into_iter()
            .filter(|hit| hit.score >= threshold)
            .map(|hit| {
                ScoredChunk::new(Chunk::from_parts(hit.source.text, hit.source.metadata), hit.score)
            })
            .collect())
    }

    async fn ping(&self) -> Result<bool, RagError> {
        Ok(self
            .client
            .get_json(&self.base_url, self.headers())
            .await
            .is_ok())
    }
}
