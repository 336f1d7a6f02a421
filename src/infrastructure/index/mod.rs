//! Vector index backends

pub mod elasticsearch;
pub mod in_memory;

pub use elasticsearch::ElasticsearchIndex;
pub use in_memory::InMemoryIndex;
