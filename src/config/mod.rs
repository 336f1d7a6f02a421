pub mod app_config;

pub use app_config::{
    AppConfig, ChunkingSettings, ElasticsearchConfig, LogFormat, LoggingConfig, OpenAiConfig,
    RetrievalSettings, UploadsConfig,
};
