//! Chat model implementations

pub mod openai;

pub use openai::OpenAiChatModel;
