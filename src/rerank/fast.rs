use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::{FAST_CONTENT_PREFIX, FAST_SCORE_KEY};
use crate::document::Document;
use crate::scoring::{PassageScorer, score_aligned};

use super::sort_by_score_desc;

/// First-pass reranker over a lightweight model.
#[derive(Clone)]
pub struct FastReranker {
    scorer: Arc<dyn PassageScorer>,
}

impl std::fmt::Debug for FastReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastReranker")
            .field("scorer", &self.scorer.name())
            .field("available", &self.is_available())
            .finish()
    }
}

impl FastReranker {
    pub fn new(scorer: Arc<dyn PassageScorer>) -> Self {
        Self { scorer }
    }

    pub fn is_available(&self) -> bool {
        self.scorer.is_available()
    }

    /// Reorders `documents` by relevance of their first 500 characters to `query` and
    /// keeps the best `width`.
    ///
    /// Returns the input untouched (not truncated) when the model is unavailable,
    /// when there is nothing to reorder, or when scoring fails.
    pub fn rerank(&self, query: &str, documents: Vec<Document>, width: usize) -> Vec<Document> {
        if !self.is_available() || documents.len() <= 1 {
            return documents;
        }

        let passages: Vec<&str> = documents
            .iter()
            .map(|d| d.content_prefix(FAST_CONTENT_PREFIX))
            .collect();
        let scores = match score_aligned(self.scorer.as_ref(), query, &passages) {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    scorer = self.scorer.name(),
                    error = %e,
                    "Fast rerank failed, keeping original order"
                );
                return documents;
            }
        };

        let input_len = documents.len();
        let reranked: Vec<Document> = sort_by_score_desc(documents, scores)
            .into_iter()
            .take(width)
            .map(|(mut doc, score)| {
                doc.annotate(FAST_SCORE_KEY, f64::from(score));
                doc
            })
            .collect();

        debug!(
            scorer = self.scorer.name(),
            input = input_len,
            kept = reranked.len(),
            top_score = reranked.first().and_then(Document::fast_score),
            "Fast rerank complete"
        );

        reranked
    }
}
