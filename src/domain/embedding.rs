//! Embedding capability trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::error::RagError;

/// Trait for embedding providers (OpenAI, etc.)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Compute the embedding vector for a piece of text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// Mock embedding provider with scripted vectors per text.
    ///
    /// Unscripted texts fall back to a deterministic hash-derived vector.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        vectors: HashMap<String, Vec<f32>>,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                vectors: HashMap::new(),
                error: None,
            }
        }

        pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.into(), vector);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
            if let Some(ref error) = self.error {
                return Err(RagError::provider("mock-embedding", error));
            }

            if let Some(vector) = self.vectors.get(text) {
                return Ok(vector.clone());
            }

            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            Ok((0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect())
        }

        fn provider_name(&self) -> &'static str {
            "mock-embedding"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_scripted_vector() {
            let provider = MockEmbeddingProvider::new(3).with_vector("hello", vec![1.0, 0.0, 0.0]);

            assert_eq!(provider.embed("hello").await.unwrap(), vec![1.0, 0.0, 0.0]);
        }

        #[tokio::test]
        async fn test_fallback_is_deterministic() {
            let provider = MockEmbeddingProvider::new(8);

            let a = provider.embed("some text").await.unwrap();
            let b = provider.embed("some text").await.unwrap();

            assert_eq!(a.len(), 8);
            assert_eq!(a, b);
        }

        #[tokio::test]
        async fn test_scripted_error() {
            let provider = MockEmbeddingProvider::new(3).with_error("boom");
            assert!(provider.embed("hello").await.is_err());
        }
    }
}
