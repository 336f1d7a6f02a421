//! OpenAI chat model provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{ChatModel, Message, RagError};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat completions adapter. Single-shot, no streaming.
#[derive(Debug)]
pub struct OpenAiChatModel<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl<C: HttpClientTrait> OpenAiChatModel<C> {
    pub fn new(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self::with_base_url(client, api_key, model, temperature, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl<C: HttpClientTrait> ChatModel for OpenAiChatModel<C> {
    async fn generate(&self, messages: &[Message]) -> Result<String, RagError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
        });

        let json = self
            .client
            .post_json(&self.chat_completions_url(), self.headers(), &body)
            .await?;

        let response: ChatResponse = serde_json::from_value(json).map_err(|e| {
            RagError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RagError::provider("openai", "No choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
            }],
        })
    }

    #[tokio::test]
    async fn test_generate_returns_content() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            completion(r#"{"answer": "Paris"}"#),
        );
        let model = OpenAiChatModel::new(client, "sk-test", "gpt-3.5-turbo", 0.1);

        let reply = model.generate(&[Message::user("q")]).await.unwrap();

        assert_eq!(reply, r#"{"answer": "Paris"}"#);
    }

    #[tokio::test]
    async fn test_generate_sends_messages_and_temperature() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            completion("ok"),
        );
        let model = OpenAiChatModel::new(client, "sk-test", "gpt-3.5-turbo", 0.1);

        model
            .generate(&[Message::system("be brief"), Message::user("q")])
            .await
            .unwrap();

        let requests = model.client.requests();
        let body = &requests[0].1;
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "q");
    }

    #[tokio::test]
    async fn test_no_choices_is_provider_error() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            serde_json::json!({ "choices": [] }),
        );
        let model = OpenAiChatModel::new(client, "sk-test", "gpt-3.5-turbo", 0.1);

        assert!(model.generate(&[Message::user("q")]).await.is_err());
    }
}
