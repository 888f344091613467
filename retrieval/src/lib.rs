//! # Retrieval
//!
//! The read path of TableQA: embed a free-text question, rank every indexed
//! document by exact cosine similarity, and assemble the ranked evidence
//! into a strictly grounded prompt for a downstream chat model.
//!
//! ```text
//! question ──► Embedder ──► FlatIndex::search ──► ranked documents
//!                                                      │
//!                                                      ▼
//!                                              grounded prompt ──► ChatClient
//! ```
//!
//! The [`Retriever`] holds its embedding provider and corpus snapshot as
//! explicit long-lived handles constructed once at startup; there is no
//! hidden process-global state.

pub mod chat;
pub mod config;
pub mod error;
pub mod prompt;
pub mod service;

pub use chat::{ChatClient, OllamaChat};
pub use config::{ChatConfig, EmbeddingConfig, EmbeddingProviderKind, RetrievalConfig};
pub use error::{Result, RetrievalError};
pub use prompt::{NOT_FOUND_ANSWER, SYSTEM_INSTRUCTION, build_prompt};
pub use service::{DEFAULT_TOP_K, Retriever, ScoredDocument};
