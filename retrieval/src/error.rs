//! Error types for the retrieval service.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval service and chat client.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Embedding the query failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] tableqa_embeddings::EmbeddingError),

    /// Index error.
    #[error("index error: {0}")]
    Index(#[from] tableqa_index::IndexError),

    /// Caller-supplied argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Chat API request failed.
    #[error("chat request failed: {0}")]
    ChatRequest(String),

    /// Chat API returned an unusable response.
    #[error("invalid chat response: {0}")]
    InvalidChatResponse(String),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
