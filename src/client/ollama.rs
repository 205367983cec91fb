use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{RecipeError, Result};
use crate::models::{ChatRequest, ChatResponse, ModelOptions};

/// A single-shot chat completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one system + user exchange and returns the reply text.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: Option<&ModelOptions>,
    ) -> Result<String>;

    fn model_name(&self) -> &str;
}

pub struct OllamaApiClient {
    http_client: Client,
    pub base_url: String,
    pub model: String,
}

impl OllamaApiClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecipeError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl ChatModel for OllamaApiClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: Option<&ModelOptions>,
    ) -> Result<String> {
        let url = self.chat_url();
        let request = ChatRequest::json_completion(&self.model, system_prompt, user_prompt, options);

        debug!("Sending chat request to: {}", url);

        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecipeError::Transport(format!(
                "chat request failed {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        debug!("Raw chat response: {}", body);

        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            RecipeError::Transport(format!("failed to decode chat response envelope: {}", e))
        })?;

        Ok(chat.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> OllamaApiClient {
        OllamaApiClient::new(&server.uri(), "mistral", timeout).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation_trims_trailing_slash() {
        let client =
            OllamaApiClient::new("http://localhost:11434/", "mistral", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model_name(), "mistral");
    }

    #[tokio::test]
    async fn test_generate_sends_two_turn_json_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "mistral",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "usr" }
                ],
                "format": "json",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral",
                "message": { "role": "assistant", "content": "{\"dishes\": []}" },
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let text = client.generate("sys", "usr", None).await.unwrap();
        assert_eq!(text, "{\"dishes\": []}");
    }

    #[tokio::test]
    async fn test_options_only_sent_when_set() {
        let request = ChatRequest::json_completion("m", "s", "u", None);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("options").is_none());
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);

        let options = ModelOptions {
            temperature: Some(0.3),
            ..ModelOptions::default()
        };
        let request = ChatRequest::json_completion("m", "s", "u", Some(&options));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["options"], json!({ "temperature": 0.3 }));

        let request = ChatRequest::json_completion("m", "s", "u", Some(&ModelOptions::default()));
        assert!(request.options.is_none());
    }

    #[tokio::test]
    async fn test_missing_content_yields_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        assert_eq!(client.generate("s", "u", None).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.generate("s", "u", None).await.unwrap_err();
        match err {
            RecipeError::Transport(message) => assert!(message.contains("model not found")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": { "content": "{}" } }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(100));
        let err = client.generate("s", "u", None).await.unwrap_err();
        assert!(matches!(err, RecipeError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client =
            OllamaApiClient::new("http://127.0.0.1:1", "mistral", Duration::from_secs(2)).unwrap();
        let err = client.generate("s", "u", None).await.unwrap_err();
        assert!(matches!(err, RecipeError::Transport(_)));
    }
}
