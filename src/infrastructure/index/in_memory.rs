//! In-memory vector index for development and testing

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Chunk, EmbeddingProvider, RagError, ScoredChunk, VectorIndex};

/// In-memory vector index: chunks and their embeddings in a Vec, scored by
/// normalized cosine similarity `(1 + cos) / 2`, the same scale the
/// Elasticsearch backend reports.
#[derive(Debug)]
pub struct InMemoryIndex {
    embeddings: Arc<dyn EmbeddingProvider>,
    entries: RwLock<Vec<StoredChunk>>,
    writes: AtomicUsize,
}

#[derive(Debug, Clone)]
struct StoredChunk {
    chunk: Chunk,
    vector: Vec<f32>,
}

impl InMemoryIndex {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embeddings,
            entries: RwLock::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Total chunk writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn normalized_cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (1.0 + dot / (norm_a * norm_b)) / 2.0
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn store(&self, chunks: Vec<Chunk>) -> Result<usize, RagError> {
        let mut stored = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let vector = self.embeddings.embed(chunk.text()).await?;
            stored.push(StoredChunk { chunk, vector });
        }

        let count = stored.len();
        self.entries.write().await.extend(stored);
        self.writes.fetch_add(count, Ordering::SeqCst);

        Ok(count)
    }

    async fn search(
        &self,
        query: &str,
        k: usize,
        threshold: f32,
    ) -> Result<Vec<ScoredChunk>, RagError> {
        let query_vector = self.embeddings.embed(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|entry| {
                ScoredChunk::new(
                    entry.chunk.clone(),
                    normalized_cosine(&query_vector, &entry.vector),
                )
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored.retain(|s| s.score >= threshold);

        Ok(scored)
    }

    async fn ping(&self) -> Result<bool, RagError> {
        Ok(true)
    }
}
