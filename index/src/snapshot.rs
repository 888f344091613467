//! Corpus snapshot persistence.
//!
//! A snapshot is the triple (vector index, documents, records) persisted as a
//! durable artifact pair under a shared path prefix:
//!
//! - `<prefix>.vec`: binary vector artifact with 4-byte magic, format
//!   version, dimension, and count as little-endian u32, followed by the
//!   flat f32 vector data in little-endian byte order.
//! - `<prefix>.docs.json`: JSON artifact with the ordered document strings
//!   and the ordered source records, preserving field types.
//!
//! The pair is not written atomically. Load guards against a half-updated
//! pair by refusing any snapshot whose three sequences disagree on length,
//! rather than silently truncating.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use tableqa_corpus::Record;

use crate::error::{IndexError, Result};
use crate::flat::FlatIndex;

const VECTOR_MAGIC: [u8; 4] = *b"TQIX";
const VECTOR_FORMAT_VERSION: u32 = 1;
const VECTOR_HEADER_LEN: usize = 16;

const VECTOR_SUFFIX: &str = "vec";
const DOCS_SUFFIX: &str = "docs.json";

/// The consistent triple of index + documents + records.
///
/// Built once, in full, then read-only for the lifetime of the serving
/// process; rebuilding means discarding and recreating the whole snapshot.
/// Id `i` in the index always corresponds to `documents[i]` and `records[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSnapshot {
    index: FlatIndex,
    documents: Vec<String>,
    records: Vec<Record>,
}

/// On-disk form of the documents artifact.
#[derive(Serialize, Deserialize)]
struct DocsArtifact {
    documents: Vec<String>,
    records: Vec<Record>,
}

impl CorpusSnapshot {
    /// Assemble a snapshot, verifying the parallel-sequence invariant.
    pub fn new(index: FlatIndex, documents: Vec<String>, records: Vec<Record>) -> Result<Self> {
        if index.count() != documents.len() || documents.len() != records.len() {
            return Err(IndexError::CorpusInconsistent {
                vectors: index.count(),
                documents: documents.len(),
                records: records.len(),
            });
        }
        Ok(Self {
            index,
            documents,
            records,
        })
    }

    /// The vector index.
    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    /// The ordered document strings.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// The ordered source records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The document rendered from record `id`.
    pub fn document(&self, id: usize) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Write both artifacts under the given path prefix.
    pub fn save(&self, prefix: impl AsRef<Path>) -> Result<()> {
        let prefix = prefix.as_ref();
        if let Some(parent) = prefix.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let vector_path = artifact_path(prefix, VECTOR_SUFFIX);
        let docs_path = artifact_path(prefix, DOCS_SUFFIX);

        let dim = self.index.dim().unwrap_or(0);
        let data = self.index.raw_data();

        let mut bytes = Vec::with_capacity(VECTOR_HEADER_LEN + data.len() * 4);
        bytes.extend_from_slice(&VECTOR_MAGIC);
        bytes.extend_from_slice(&VECTOR_FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(dim as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.index.count() as u32).to_le_bytes());
        for value in data {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        fs::write(&vector_path, bytes)?;

        let artifact = DocsArtifact {
            documents: self.documents.clone(),
            records: self.records.clone(),
        };
        fs::write(&docs_path, serde_json::to_vec(&artifact)?)?;

        info!(
            "Saved corpus snapshot ({} entries) to {} and {}",
            self.len(),
            vector_path.display(),
            docs_path.display()
        );
        Ok(())
    }

    /// Load a snapshot from the artifact pair under the given path prefix.
    ///
    /// Fails with [`IndexError::NotFound`] if either artifact is missing,
    /// [`IndexError::CorruptArtifact`] if either fails to parse, and
    /// [`IndexError::CorpusInconsistent`] if the sequences disagree.
    pub fn load(prefix: impl AsRef<Path>) -> Result<Self> {
        let prefix = prefix.as_ref();
        let vector_path = artifact_path(prefix, VECTOR_SUFFIX);
        let docs_path = artifact_path(prefix, DOCS_SUFFIX);

        for path in [&vector_path, &docs_path] {
            if !path.exists() {
                return Err(IndexError::NotFound(path.clone()));
            }
        }

        let index = read_vector_artifact(&vector_path)?;

        let docs_bytes = fs::read(&docs_path)?;
        let artifact: DocsArtifact =
            serde_json::from_slice(&docs_bytes).map_err(|e| IndexError::CorruptArtifact {
                path: docs_path.clone(),
                reason: e.to_string(),
            })?;

        let snapshot = Self::new(index, artifact.documents, artifact.records)?;
        info!(
            "Loaded corpus snapshot ({} entries) from {}",
            snapshot.len(),
            prefix.display()
        );
        Ok(snapshot)
    }
}

fn artifact_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut os = prefix.as_os_str().to_owned();
    os.push(".");
    os.push(suffix);
    PathBuf::from(os)
}

fn read_vector_artifact(path: &Path) -> Result<FlatIndex> {
    let corrupt = |reason: String| IndexError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = fs::read(path)?;
    if bytes.len() < VECTOR_HEADER_LEN {
        return Err(corrupt(format!("header truncated at {} bytes", bytes.len())));
    }

    let (header, body) = bytes.split_at(VECTOR_HEADER_LEN);
    if header[0..4] != VECTOR_MAGIC {
        return Err(corrupt("bad magic".to_string()));
    }

    let field = |offset: usize| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&header[offset..offset + 4]);
        u32::from_le_bytes(buf)
    };

    let version = field(4);
    if version != VECTOR_FORMAT_VERSION {
        return Err(corrupt(format!("unsupported format version {version}")));
    }

    let dim = field(8) as usize;
    let count = field(12) as usize;

    let expected_body = dim
        .checked_mul(count)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| corrupt("vector data length overflows".to_string()))?;
    if body.len() != expected_body {
        return Err(corrupt(format!(
            "expected {expected_body} bytes of vector data, found {}",
            body.len()
        )));
    }

    let data: Vec<f32> = body
        .chunks_exact(4)
        .map(|chunk| {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(chunk);
            f32::from_le_bytes(buf)
        })
        .collect();

    let dim = if count == 0 && dim == 0 { None } else { Some(dim) };
    Ok(FlatIndex::from_parts(dim, count, data))
}
