//! Error types for the vector index and snapshot store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur in the index and snapshot store.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Vector shape violates the fixed-dimension invariant.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A snapshot artifact is missing.
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    /// A snapshot artifact failed to deserialize.
    #[error("corrupt artifact {path}: {reason}")]
    CorruptArtifact { path: PathBuf, reason: String },

    /// Index, documents, and records disagree on length.
    #[error(
        "corpus inconsistent: {vectors} vectors, {documents} documents, {records} records"
    )]
    CorpusInconsistent {
        vectors: usize,
        documents: usize,
        records: usize,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
