//! Passage scoring models behind one seam.
//!
//! Both rerank stages talk to a [`PassageScorer`]: a batchable
//! `score(query, passages)` call plus an availability flag. The flag is a property of
//! the instance, fixed when the model is loaded, so stages can skip an absent model
//! without any process-wide state.
//!
//! Implementations:
//! - [`Reranker`](crate::embedding::Reranker): candle cross-encoder, available only if
//!   its model loaded.
//! - [`LexicalScorer`](crate::embedding::LexicalScorer): keyword overlap, always available.
//! - [`MockScorer`]: scripted scores and failures for tests.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;

use crate::embedding::{LexicalScorer, Reranker};

/// A (query, passage) relevance model. Higher scores mean more relevant.
///
/// Implementations must be safe to call from concurrent requests.
pub trait PassageScorer: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Whether the model can score. Constant for the lifetime of the instance.
    fn is_available(&self) -> bool;

    /// Scores each passage against `query`; the result is index-aligned with `passages`.
    fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, ScoringError>;
}

impl PassageScorer for Reranker {
    fn name(&self) -> &str {
        "cross-encoder"
    }

    fn is_available(&self) -> bool {
        self.is_model_loaded()
    }

    fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, ScoringError> {
        Ok(Reranker::score_batch(self, query, passages)?)
    }
}

impl PassageScorer for LexicalScorer {
    fn name(&self) -> &str {
        "lexical"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, ScoringError> {
        Ok(passages.iter().map(|p| self.score(query, p)).collect())
    }
}

/// Scores `passages` and checks the model returned exactly one score per passage.
pub(crate) fn score_aligned(
    scorer: &dyn PassageScorer,
    query: &str,
    passages: &[&str],
) -> Result<Vec<f32>, ScoringError> {
    let scores = scorer.score_batch(query, passages)?;
    if scores.len() != passages.len() {
        return Err(ScoringError::LengthMismatch {
            expected: passages.len(),
            actual: scores.len(),
        });
    }
    Ok(scores)
}
