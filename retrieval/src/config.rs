//! Configuration for the retrieval service and its external collaborators.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tableqa_embeddings::{EmbeddingProvider, OllamaProvider, OpenAiProvider};

use crate::service::DEFAULT_TOP_K;

/// Configuration for the retrieval service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of documents retrieved per query.
    pub top_k: usize,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Chat model configuration.
    pub chat: ChatConfig,
}

impl RetrievalConfig {
    /// Set the number of documents retrieved per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.embedding = embedding;
        self
    }

    /// Set the chat configuration.
    pub fn with_chat(mut self, chat: ChatConfig) -> Self {
        self.chat = chat;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            embedding: EmbeddingConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

/// Which embedding provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Ollama-hosted local model.
    Ollama,
    /// OpenAI embeddings API.
    OpenAi,
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderKind,

    /// Model override; each provider has its own default.
    pub model: Option<String>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl EmbeddingConfig {
    /// Construct the configured provider as a shared handle.
    pub fn build(&self) -> Arc<dyn EmbeddingProvider> {
        match self.provider {
            EmbeddingProviderKind::Ollama => {
                let mut provider = OllamaProvider::new();
                if let Some(model) = &self.model {
                    provider = provider.with_model(model.clone());
                }
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url.clone());
                }
                Arc::new(provider)
            }
            EmbeddingProviderKind::OpenAi => {
                let mut provider = OpenAiProvider::new();
                if let Some(model) = &self.model {
                    provider = provider.with_model(model.clone());
                }
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url.clone());
                }
                Arc::new(provider)
            }
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Ollama,
            model: None,
            base_url: None,
        }
    }
}

/// Configuration for the downstream chat model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat model name.
    pub model: String,

    /// Base URL of the Ollama server.
    pub base_url: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2:3b".to_string(),
            base_url: "http://localhost:11434".to_string(),
        }
    }
}
