//! Vector index capability trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::chunk::{Chunk, ScoredChunk};
use crate::domain::error::RagError;

/// Trait for the backing vector index (Elasticsearch, in-memory, etc.)
///
/// Scores follow normalized cosine similarity in `[0, 1]`, higher is more
/// similar; implementations must keep to that scale so the configured
/// threshold is portable across backends.
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Embed and store the chunks, returning how many were written.
    ///
    /// Stored chunks must be visible to subsequent searches before this
    /// call returns. An unreachable engine surfaces
    /// [`RagError::IndexUnavailable`] without internal retries.
    async fn store(&self, chunks: Vec<Chunk>) -> Result<usize, RagError>;

    /// Similarity-search the index: at most `k` results requested from the
    /// engine, then filtered to `score >= threshold` and ordered by
    /// descending score. The result may be smaller than `k` or empty; it is
    /// never padded.
    async fn search(
        &self,
        query: &str,
        k: usize,
        threshold: f32,
    ) -> Result<Vec<ScoredChunk>, RagError>;

    /// Check that the backing engine is reachable.
    async fn ping(&self) -> Result<bool, RagError>;
}
