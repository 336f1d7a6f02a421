//! Pipeline orchestrator: ingest documents, answer queries

use std::path::Path;
use std::sync::Arc;

use crate::domain::chat::ChatModel;
use crate::domain::chunk::Chunk;
use crate::domain::error::RagError;
use crate::domain::index::VectorIndex;
use crate::domain::loader::{FileType, LoaderRegistry};
use crate::domain::chunker::TextSplitter;
use crate::domain::prompt::build_prompt;
use crate::domain::schema::StructuredAnswer;
use crate::domain::validator::parse_structured;

/// Retrieval policy for one query.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalOptions {
    pub top_k: usize,
    pub score_threshold: f32,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            score_threshold: 0.9,
        }
    }
}

/// How stored source paths are rewritten into the display-safe pointers
/// attached to a response. The storage dir prefix is stripped and replaced
/// with the public prefix.
#[derive(Debug, Clone)]
pub struct CitationConfig {
    pub storage_dir: String,
    pub public_prefix: String,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            storage_dir: "./uploads".to_string(),
            public_prefix: "/uploads".to_string(),
        }
    }
}

/// Composes loading, chunking, retrieval, prompting and validation into the
/// two pipeline operations.
///
/// Handles one logical request end-to-end on one task; the index and chat
/// handles are long-lived and shared, and nothing here mutates them.
#[derive(Debug)]
pub struct RagPipeline {
    index: Arc<dyn VectorIndex>,
    chat: Arc<dyn ChatModel>,
    loaders: LoaderRegistry,
    splitter: TextSplitter,
    retrieval: RetrievalOptions,
    citations: CitationConfig,
}

impl RagPipeline {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        chat: Arc<dyn ChatModel>,
        loaders: LoaderRegistry,
    ) -> Self {
        Self {
            index,
            chat,
            loaders,
            splitter: TextSplitter::default(),
            retrieval: RetrievalOptions::default(),
            citations: CitationConfig::default(),
        }
    }

    pub fn with_splitter(mut self, splitter: TextSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalOptions) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_citations(mut self, citations: CitationConfig) -> Self {
        self.citations = citations;
        self
    }

    /// Load, chunk and store one file. Returns the number of stored chunks.
    ///
    /// A declared type outside the allow-list fails with
    /// `UnsupportedFileType` before any loader runs; a file yielding zero
    /// chunks fails with `EmptyDocument` before any store call.
    pub async fn ingest(&self, path: &Path, declared_type: &str) -> Result<usize, RagError> {
        let file_type = FileType::from_declared(declared_type)
            .ok_or_else(|| RagError::unsupported_file_type(declared_type))?;

        let loader = self
            .loaders
            .get(file_type)
            .ok_or_else(|| RagError::unsupported_file_type(declared_type))?;

        let segments = loader.load(path)?;
        let source = path.to_string_lossy().into_owned();
        let chunks: Vec<Chunk> = self.splitter.chunk_all(segments, &source);

        if chunks.is_empty() {
            return Err(RagError::empty_document(source));
        }

        let stored = self.index.store(chunks).await?;
        tracing::info!(%source, stored, "document ingested");

        Ok(stored)
    }

    /// Answer a query from the knowledge base.
    ///
    /// Fails with `InsufficientKnowledge` both when no chunk meets the
    /// relevance threshold and when the model's reply fails schema
    /// validation; callers see a single "no good answer" signal either way.
    pub async fn answer(&self, query: &str) -> Result<StructuredAnswer, RagError> {
        let retrieved = self
            .index
            .search(query, self.retrieval.top_k, self.retrieval.score_threshold)
            .await?;

        if retrieved.is_empty() {
            tracing::info!("no chunk met the relevance threshold");
            return Err(RagError::InsufficientKnowledge);
        }

        let schema = StructuredAnswer::schema();
        let chunks: Vec<Chunk> = retrieved.iter().map(|s| s.chunk.clone()).collect();
        let messages = build_prompt(query, &chunks, &schema);

        let raw = self.chat.generate(&messages).await?;
        let mut answer: StructuredAnswer =
            parse_structured(&raw, &schema).ok_or(RagError::InsufficientKnowledge)?;

        answer.context = chunks.iter().map(|c| c.text().to_string()).collect();
        answer.sources = chunks
            .iter()
            .filter_map(|c| c.source())
            .map(|source| self.public_location(source))
            .collect();

        tracing::info!(
            retrieved = retrieved.len(),
            sources = answer.sources.len(),
            "query answered"
        );

        Ok(answer)
    }

    /// Check that the backing index is reachable.
    pub async fn health_check(&self) -> Result<bool, RagError> {
        self.index.ping().await
    }

    /// Strip the storage dir prefix, leaving the relative pointer callers
    /// can dereference under the public prefix.
    fn public_location(&self, source: &str) -> String {
        let marker = format!("{}/", self.citations.storage_dir.trim_end_matches('/'));
        let relative = source.rsplit(marker.as_str()).next().unwrap_or(source);

        format!(
            "{}/{}",
            self.citations.public_prefix.trim_end_matches('/'),
            relative
        )
    }
}
