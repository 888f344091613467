//! # Index
//!
//! Exact-search vector index and corpus snapshot persistence for TableQA.
//!
//! [`FlatIndex`] holds N fixed-dimension vectors in a flat array and answers
//! top-k queries by scanning every stored vector. Exact search is O(N·D) per
//! query; that is a deliberate choice of correctness and simplicity over
//! scale, and it keeps results bit-identical across calls and restarts.
//!
//! [`CorpusSnapshot`] ties the index to the parallel document and record
//! sequences and persists the triple as a durable artifact pair. The one
//! invariant that must never be violated is the id → document mapping: a
//! silent mismatch would hand confidently wrong "verbatim" evidence to the
//! end user.

pub mod error;
pub mod flat;
pub mod snapshot;

pub use error::{IndexError, Result};
pub use flat::{FlatIndex, SearchHit};
pub use snapshot::CorpusSnapshot;
