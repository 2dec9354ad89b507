use thiserror::Error;

use crate::embedding::RerankerError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    #[error("scorer '{scorer}' is not available")]
    Unavailable { scorer: String },

    #[error("scorer returned {actual} scores for {expected} passages")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
