//! # Corpus
//!
//! Typed records ingested from the cleaned tabular source, and the canonical
//! rendering of each record into a single natural-language document.
//!
//! A [`Record`] maps field names to scalar [`Value`]s. [`render_document`]
//! turns one record into one document string using a fixed template; the
//! document is the unit that gets embedded and later quoted verbatim back to
//! the user as evidence, so rendering must be deterministic and total.

pub mod record;
pub mod render;

pub use record::{Record, Value};
pub use render::render_document;
