//! Flat exact-search vector index.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndexError, Result};

/// A single search hit: the stored vector's id and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Zero-based insertion position of the matched vector.
    pub id: usize,

    /// Inner-product similarity against the query.
    pub score: f32,
}

/// Exact-search index over fixed-dimension vectors.
///
/// Vectors are stored in insertion order in one flat array; the id assigned
/// at insertion never changes and is the join key back to the document and
/// record sequences. The index assumes all vectors, including queries,
/// arrive pre-normalized, so inner product equals cosine similarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex {
    /// Vector dimension, fixed by the first insert.
    dim: Option<usize>,

    /// Number of stored vectors.
    count: usize,

    /// Flat row-major vector data, `count * dim` values.
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index. The dimension is fixed by the first insert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vector dimension, if any vector has been inserted.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// Number of stored vectors.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append a vector and return its assigned id.
    ///
    /// Fails with [`IndexError::DimensionMismatch`] if the vector's length
    /// differs from the fixed dimension; a failed insert leaves the index
    /// unchanged.
    pub fn insert(&mut self, vector: &[f32]) -> Result<usize> {
        match self.dim {
            Some(dim) if vector.len() != dim => {
                return Err(IndexError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            None => self.dim = Some(vector.len()),
            Some(_) => {}
        }

        self.data.extend_from_slice(vector);
        let id = self.count;
        self.count += 1;
        Ok(id)
    }

    /// Return the `k` highest-scoring `(id, score)` pairs for the query.
    ///
    /// Results are sorted descending by score; equal scores break toward the
    /// lower id. An empty index returns an empty sequence; `k` larger than
    /// the count returns all stored vectors. Scores accumulate sequentially,
    /// so repeated calls return bit-identical sequences.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        let Some(dim) = self.dim else {
            return Ok(Vec::new());
        };

        if query.len() != dim {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(OrderedFloat<f32>, usize)> = Vec::with_capacity(self.count);
        for id in 0..self.count {
            let row = &self.data[id * dim..(id + 1) * dim];
            let score: f32 = row.iter().zip(query).map(|(a, b)| a * b).sum();
            scored.push((OrderedFloat(score), id));
        }

        scored.sort_by_key(|&(score, id)| (std::cmp::Reverse(score), id));
        scored.truncate(k);

        debug!("search returned {} of {} vectors", scored.len(), self.count);

        Ok(scored
            .into_iter()
            .map(|(score, id)| SearchHit { id, score: score.0 })
            .collect())
    }

    /// Flat row-major vector data.
    pub(crate) fn raw_data(&self) -> &[f32] {
        &self.data
    }

    /// Rebuild an index from persisted parts. The caller has already
    /// validated `data.len() == dim * count`.
    pub(crate) fn from_parts(dim: Option<usize>, count: usize, data: Vec<f32>) -> Self {
        Self { dim, count, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_vector_index() -> FlatIndex {
        let mut index = FlatIndex::new();
        index.insert(&[1.0, 0.0]).unwrap();
        index.insert(&[0.0, 1.0]).unwrap();
        index.insert(&[0.6, 0.8]).unwrap();
        index
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut index = FlatIndex::new();
        assert_eq!(index.insert(&[1.0, 0.0]).unwrap(), 0);
        assert_eq!(index.insert(&[0.0, 1.0]).unwrap(), 1);
        assert_eq!(index.count(), 2);
        assert_eq!(index.dim(), Some(2));
    }

    #[test]
    fn insert_rejects_wrong_dimension_without_side_effects() {
        let mut index = three_vector_index();
        let err = index.insert(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(index.count(), 3);
    }

    #[test]
    fn search_ranks_by_inner_product() {
        // Querying [0.6, 0.8] against [1,0], [0,1], [0.6,0.8] must return
        // id 2 (score ~1.0), then id 1 (0.8), and id 0 (0.6) only at k=3.
        let index = three_vector_index();
        let hits = index.search(&[0.6, 0.8], 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 2);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert_eq!(hits[1].id, 1);
        assert!((hits[1].score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn search_scores_never_increase() {
        let index = three_vector_index();
        let hits = index.search(&[0.6, 0.8], 3).unwrap();
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn equal_scores_break_toward_lower_id() {
        let mut index = FlatIndex::new();
        index.insert(&[1.0, 0.0]).unwrap();
        index.insert(&[0.0, 1.0]).unwrap();
        index.insert(&[1.0, 0.0]).unwrap();

        // Ids 0 and 2 tie exactly; 0 must come first.
        let hits = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(hits[0].id, 0);
        assert_eq!(hits[1].id, 2);
        assert_eq!(hits[2].id, 1);
    }

    #[test]
    fn search_is_idempotent() {
        let index = three_vector_index();
        let first = index.search(&[0.6, 0.8], 3).unwrap();
        let second = index.search(&[0.6, 0.8], 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn k_beyond_count_returns_all() {
        let index = three_vector_index();
        let hits = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn empty_index_returns_empty_results() {
        let index = FlatIndex::new();
        let hits = index.search(&[1.0, 0.0], 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn search_rejects_wrong_query_dimension() {
        let index = three_vector_index();
        let err = index.search(&[1.0, 0.0, 0.0], 2).unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch { .. }));
    }
}
