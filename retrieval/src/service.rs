//! Retrieval service: answer a free-text query with ranked evidence.

use std::sync::Arc;

use tracing::debug;

use tableqa_embeddings::EmbeddingProvider;
use tableqa_index::{CorpusSnapshot, IndexError};

use crate::error::{Result, RetrievalError};

/// Default number of documents retrieved per query.
pub const DEFAULT_TOP_K: usize = 10;

/// One retrieved document with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// Cosine similarity between the query and the document.
    pub score: f32,

    /// The document text, verbatim as indexed.
    pub document: String,

    /// Position of the source record in the corpus.
    pub record_id: usize,
}

/// Read path over an immutable corpus snapshot.
///
/// Constructed once at startup with long-lived handles and reused for all
/// queries. The only side effect of a retrieval is the embedder call; the
/// query is re-embedded on every call, with no cache layer in between.
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    snapshot: CorpusSnapshot,
}

impl Retriever {
    /// Create a retriever over the given provider and snapshot.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, snapshot: CorpusSnapshot) -> Self {
        Self { provider, snapshot }
    }

    /// The corpus snapshot being served.
    pub fn snapshot(&self) -> &CorpusSnapshot {
        &self.snapshot
    }

    /// Retrieve the `k` most similar documents for a free-text query.
    ///
    /// Embedding failures propagate unchanged; low-similarity hits are not
    /// suppressed or thresholded here.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>> {
        if k == 0 {
            return Err(RetrievalError::InvalidArgument(
                "k must be positive".to_string(),
            ));
        }

        debug!("retrieving top {k} documents");
        let query_vector = self.provider.embed(query).await?;
        let hits = self.snapshot.index().search(&query_vector, k)?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let document = self.snapshot.document(hit.id).ok_or_else(|| {
                RetrievalError::Index(IndexError::CorpusInconsistent {
                    vectors: self.snapshot.index().count(),
                    documents: self.snapshot.documents().len(),
                    records: self.snapshot.records().len(),
                })
            })?;
            results.push(ScoredDocument {
                score: hit.score,
                document: document.to_string(),
                record_id: hit.id,
            });
        }
        Ok(results)
    }

    /// Retrieve with the default `k` of [`DEFAULT_TOP_K`].
    pub async fn retrieve_default(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        self.retrieve(query, DEFAULT_TOP_K).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tableqa_corpus::{Record, Value};
    use tableqa_embeddings::{Embedding, EmbeddingError};
    use tableqa_index::FlatIndex;

    /// Test double returning canned vectors per input text.
    struct StaticProvider {
        vectors: HashMap<String, Embedding>,
    }

    #[async_trait]
    impl EmbeddingProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        fn model(&self) -> &str {
            "static"
        }

        async fn embed(&self, text: &str) -> tableqa_embeddings::Result<Embedding> {
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| EmbeddingError::ApiRequest(format!("no vector for: {text}")))
        }
    }

    fn sample_retriever() -> Retriever {
        let mut index = FlatIndex::new();
        index.insert(&[1.0, 0.0]).unwrap();
        index.insert(&[0.0, 1.0]).unwrap();
        index.insert(&[0.6, 0.8]).unwrap();

        let documents = vec![
            "Employee A works in Sales.".to_string(),
            "Employee B works in Audit.".to_string(),
            "Employee C works in Risk.".to_string(),
        ];
        let records = vec![
            Record::new().with("First Name", Value::Text("A".to_string())),
            Record::new().with("First Name", Value::Text("B".to_string())),
            Record::new().with("First Name", Value::Text("C".to_string())),
        ];
        let snapshot = CorpusSnapshot::new(index, documents, records).unwrap();

        let provider = StaticProvider {
            vectors: HashMap::from([("who is in risk?".to_string(), vec![0.6, 0.8])]),
        };

        Retriever::new(Arc::new(provider), snapshot)
    }

    #[tokio::test]
    async fn retrieve_maps_ids_back_to_documents_in_rank_order() {
        let retriever = sample_retriever();
        let results = retriever.retrieve("who is in risk?", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].record_id, 2);
        assert_eq!(results[0].document, "Employee C works in Risk.");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].record_id, 1);
        assert!((results[1].score - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn retrieve_rejects_zero_k() {
        let retriever = sample_retriever();
        let err = retriever.retrieve("who is in risk?", 0).await.unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn embedding_failure_propagates() {
        let retriever = sample_retriever();
        let err = retriever.retrieve("unseen question", 3).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Embedding(_)));
    }

    #[tokio::test]
    async fn k_beyond_corpus_returns_whole_corpus() {
        let retriever = sample_retriever();
        let results = retriever.retrieve("who is in risk?", 50).await.unwrap();
        assert_eq!(results.len(), 3);
    }
}
