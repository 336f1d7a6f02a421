//! Chunk entities - the unit of indexing and retrieval

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key carrying the originating file of a chunk.
pub const SOURCE_KEY: &str = "source";

/// A bounded passage of document text plus its metadata.
///
/// Immutable once created; the `source` entry is set at construction and
/// never rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    text: String,
    metadata: HashMap<String, serde_json::Value>,
}

impl Chunk {
    /// Create a chunk tagged with its originating source.
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            SOURCE_KEY.to_string(),
            serde_json::Value::String(source.into()),
        );

        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Rebuild a chunk from stored parts, e.g. a search engine hit.
    pub fn from_parts(
        text: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Attach an extra metadata entry. An existing `source` entry cannot be
    /// overwritten; such writes are ignored.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();

        if key != SOURCE_KEY || !self.metadata.contains_key(SOURCE_KEY) {
            self.metadata.insert(key, value);
        }

        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    /// The originating source, if the metadata carries one.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).and_then(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A chunk paired with its similarity score for one query.
///
/// Scores are normalized cosine similarity in `[0, 1]`, higher is more
/// similar. Transient: lives only within a single query.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self { chunk, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_carries_source() {
        let chunk = Chunk::new("Paris is the capital of France.", "geo.txt");

        assert_eq!(chunk.text(), "Paris is the capital of France.");
        assert_eq!(chunk.source(), Some("geo.txt"));
    }

    #[test]
    fn test_chunk_extra_metadata() {
        let chunk = Chunk::new("text", "a.txt")
            .with_metadata("chunk_index", serde_json::Value::Number(2.into()));

        assert_eq!(chunk.source(), Some("a.txt"));
        assert_eq!(
            chunk.metadata().get("chunk_index"),
            Some(&serde_json::Value::Number(2.into()))
        );
    }

    #[test]
    fn test_source_cannot_be_overwritten() {
        let chunk = Chunk::new("text", "a.txt")
            .with_metadata(SOURCE_KEY, serde_json::Value::String("b.txt".to_string()));

        assert_eq!(chunk.source(), Some("a.txt"));
    }

    #[test]
    fn test_source_settable_when_absent() {
        let chunk = Chunk::from_parts("text", HashMap::new())
            .with_metadata(SOURCE_KEY, serde_json::Value::String("a.txt".to_string()));

        assert_eq!(chunk.source(), Some("a.txt"));
    }

    #[test]
    fn test_chunk_from_parts_without_source() {
        let chunk = Chunk::from_parts("text", HashMap::new());
        assert_eq!(chunk.source(), None);
    }

    #[test]
    fn test_chunk_serialization_round_trip() {
        let chunk = Chunk::new("some passage", "doc.md");
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();

        assert_eq!(back, chunk);
    }
}
