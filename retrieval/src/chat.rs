//! Chat client for the downstream language model.
//!
//! The model is an opaque collaborator: it receives the system instruction
//! and the grounded prompt, and returns answer text. Grounding discipline is
//! enforced upstream by the prompt, not here.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RetrievalError};

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Complete a system + user message pair into answer text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Ollama chat client.
pub struct OllamaChat {
    /// Base URL of the Ollama server.
    base_url: String,

    /// Chat model name.
    model: String,

    /// HTTP client.
    client: reqwest::Client,
}

impl OllamaChat {
    /// Create a client pointing at a local Ollama server.
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for OllamaChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for OllamaChat {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!("requesting chat completion with model: {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RetrievalError::ChatRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::InvalidChatResponse(e.to_string()))?;

        Ok(result.message.content.trim().to_string())
    }
}

/// Ollama chat API response format.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaChatMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn complete_returns_trimmed_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2:3b",
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "role": "assistant", "content": "  Dana Kim works in Retail Banking.\n" }
            })))
            .mount(&server)
            .await;

        let chat = OllamaChat::new().with_base_url(server.uri());
        let answer = chat.complete("system text", "user text").await.unwrap();
        assert_eq!(answer, "Dana Kim works in Retail Banking.");
    }

    #[tokio::test]
    async fn complete_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model missing"))
            .mount(&server)
            .await;

        let chat = OllamaChat::new().with_base_url(server.uri());
        let err = chat.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, RetrievalError::ChatRequest(_)));
    }
}
