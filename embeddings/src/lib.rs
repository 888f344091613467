//! # Embeddings
//!
//! Text-to-vector providers for TableQA.
//!
//! Every provider returns L2-normalized vectors of a fixed dimension for a
//! given deployment; the index downstream relies on that invariant to treat
//! inner products as cosine similarities and does no normalization of its
//! own.

pub mod error;
pub mod norm;
pub mod provider;

pub use error::{EmbeddingError, Result};
pub use norm::{l2_norm, normalize};
pub use provider::{EmbeddingProvider, OllamaProvider, OpenAiProvider};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
