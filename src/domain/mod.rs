//! Domain layer: core data types, capability traits and pipeline logic

pub mod chat;
pub mod chunk;
pub mod chunker;
pub mod embedding;
pub mod error;
pub mod index;
pub mod loader;
pub mod message;
pub mod pipeline;
pub mod prompt;
pub mod schema;
pub mod validator;

pub use chat::ChatModel;
pub use chunk::{Chunk, ScoredChunk, SOURCE_KEY};
pub use chunker::{ChunkIter, TextSplitter};
pub use embedding::EmbeddingProvider;
pub use error::RagError;
pub use index::VectorIndex;
pub use loader::{DocumentLoader, FileType, LoaderRegistry};
pub use message::{Message, MessageRole};
pub use pipeline::{CitationConfig, RagPipeline, RetrievalOptions};
pub use prompt::{build_prompt, FALLBACK_ANSWER};
pub use schema::{FieldDescriptor, FieldKind, SchemaDescriptor, StructuredAnswer};
pub use validator::parse_structured;
