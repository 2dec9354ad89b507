use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::{PRECISION_CONTENT_PREFIX, PRECISION_SCORE_KEY};
use crate::document::Document;
use crate::embedding::{Reranker, RerankerConfig};
use crate::scoring::{PassageScorer, score_aligned};

use super::sort_by_score_desc;

/// Second-pass cross-encoder reranker.
///
/// Availability is captured once, when the stage is built, and never checked again: a
/// model that failed to load stays absent for the life of the instance.
#[derive(Clone)]
pub struct PrecisionReranker {
    scorer: Arc<dyn PassageScorer>,
    available: bool,
}

impl std::fmt::Debug for PrecisionReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecisionReranker")
            .field("scorer", &self.scorer.name())
            .field("available", &self.available)
            .finish()
    }
}

impl PrecisionReranker {
    pub fn new(scorer: Arc<dyn PassageScorer>) -> Self {
        let available = scorer.is_available();
        if !available {
            info!(
                scorer = scorer.name(),
                "Precision model unavailable, precision rerank disabled"
            );
        }
        Self { scorer, available }
    }

    /// Builds the stage over a candle cross-encoder, probing the model directory once.
    pub fn from_config(config: RerankerConfig) -> Self {
        Self::new(Arc::new(Reranker::load_or_unavailable(config)))
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Scores each document's first 500 characters against `query`, sorts descending
    /// and keeps the best `top_k`, writing the score under `cross_encoder_score`.
    ///
    /// Without a model, on empty input, or if the batch call fails, returns the first
    /// `top_k` documents as given, without annotations.
    pub fn rerank(&self, query: &str, mut documents: Vec<Document>, top_k: usize) -> Vec<Document> {
        if !self.available || documents.is_empty() {
            documents.truncate(top_k);
            return documents;
        }

        let passages: Vec<&str> = documents
            .iter()
            .map(|d| d.content_prefix(PRECISION_CONTENT_PREFIX))
            .collect();

        let scores = match score_aligned(self.scorer.as_ref(), query, &passages) {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    scorer = self.scorer.name(),
                    error = %e,
                    "Precision rerank failed, returning unscored prefix"
                );
                documents.truncate(top_k);
                return documents;
            }
        };

        let input_len = documents.len();
        let reranked: Vec<Document> = sort_by_score_desc(documents, scores)
            .into_iter()
            .take(top_k)
            .map(|(mut doc, score)| {
                doc.annotate(PRECISION_SCORE_KEY, f64::from(score));
                doc
            })
            .collect();

        debug!(
            input = input_len,
            kept = reranked.len(),
            top_score = reranked.first().and_then(Document::precision_score),
            "Precision rerank complete"
        );

        reranked
    }
}
