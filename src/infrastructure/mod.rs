//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod http_client;
pub mod index;
pub mod llm;
pub mod loaders;
pub mod logging;

pub use embedding::OpenAiEmbeddings;
pub use http_client::{HttpClient, HttpClientTrait};
pub use index::{ElasticsearchIndex, InMemoryIndex};
pub use llm::OpenAiChatModel;
pub use loaders::default_registry;
pub use logging::init_logging;
