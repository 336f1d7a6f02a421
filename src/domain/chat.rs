//! Chat model capability trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::error::RagError;
use crate::domain::message::Message;

/// Trait for chat model providers. Single-shot generation, no streaming.
#[async_trait]
pub trait ChatModel: Send + Sync + Debug {
    /// Generate raw text from a message sequence
    async fn generate(&self, messages: &[Message]) -> Result<String, RagError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock chat model that replays a scripted reply and records the
    /// prompts it was called with.
    #[derive(Debug)]
    pub struct MockChatModel {
        reply: Option<String>,
        error: Option<String>,
        requests: Mutex<Vec<Vec<Message>>>,
    }

    impl MockChatModel {
        pub fn new() -> Self {
            Self {
                reply: None,
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
            self.reply = Some(reply.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// The message sequences passed to `generate`, in call order.
        pub fn requests(&self) -> Vec<Vec<Message>> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockChatModel {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ChatModel for MockChatModel {
        async fn generate(&self, messages: &[Message]) -> Result<String, RagError> {
            self.requests.lock().unwrap().push(messages.to_vec());

            if let Some(ref error) = self.error {
                return Err(RagError::provider("mock-chat", error));
            }

            self.reply
                .clone()
                .ok_or_else(|| RagError::provider("mock-chat", "No mock reply configured"))
        }

        fn provider_name(&self) -> &'static str {
            "mock-chat"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_records_requests() {
            let model = MockChatModel::new().with_reply(r#"{"answer": "hi"}"#);

            let reply = model.generate(&[Message::user("hello")]).await.unwrap();

            assert_eq!(reply, r#"{"answer": "hi"}"#);
            assert_eq!(model.requests().len(), 1);
            assert_eq!(model.requests()[0][0].content, "hello");
        }
    }
}
