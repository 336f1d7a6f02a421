//! Retrieval-augmented answering over an uploaded knowledge base
//!
//! Documents are loaded, chunked and embedded into a vector index; queries
//! retrieve the closest chunks, prompt a chat model with them and validate
//! the reply against a JSON schema before it is returned with its context
//! and source citations.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Chunk, CitationConfig, RagError, RagPipeline, RetrievalOptions, ScoredChunk, StructuredAnswer,
    TextSplitter,
};

use std::sync::Arc;

use infrastructure::http_client::HttpClient;
use infrastructure::index::ElasticsearchIndex;
use infrastructure::llm::OpenAiChatModel;
use infrastructure::loaders::default_registry;
use infrastructure::OpenAiEmbeddings;

/// Wire a pipeline from configuration: OpenAI embeddings and chat, an
/// Elasticsearch index and the full loader registry.
pub fn build_pipeline(config: &AppConfig) -> Result<RagPipeline, RagError> {
    let embeddings = Arc::new(OpenAiEmbeddings::new(
        HttpClient::new(),
        &config.openai.api_key,
        &config.openai.embedding_model,
    ));

    let mut index = ElasticsearchIndex::new(
        HttpClient::new(),
        &config.elasticsearch.url,
        &config.elasticsearch.index_name,
        embeddings,
    );

    if let (Some(username), Some(password)) = (
        config.elasticsearch.username.as_deref(),
        config.elasticsearch.password.as_deref(),
    ) {
        index = index.with_basic_auth(username, password);
    }

    let chat = OpenAiChatModel::new(
        HttpClient::new(),
        &config.openai.api_key,
        &config.openai.chat_model,
        config.openai.temperature,
    );

    let splitter = TextSplitter::new(
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
        &config.chunking.separator,
    )?;

    Ok(
        RagPipeline::new(Arc::new(index), Arc::new(chat), default_registry())
            .with_splitter(splitter)
            .with_retrieval(RetrievalOptions {
                top_k: config.retrieval.top_k,
                score_threshold: config.retrieval.score_threshold,
            })
            .with_citations(CitationConfig {
                storage_dir: config.uploads.dir.clone(),
                public_prefix: config.uploads.public_prefix.clone(),
            }),
    )
}
