use crate::constants::{
    DYNAMIC_THRESHOLD_MULTIPLIER, LENIENT_RELEVANCE_SCORE, MAX_RELEVANCE_SCORE,
    RELEVANT_SCORE_FLOOR,
};

use super::error::FilterPolicyError;
use super::types::RelevanceVerdict;

/// Tunable constants of the corrective filter.
///
/// Defaults: relevant floor 25, multiplier 0.6, lenient score 70.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    /// Minimum score for `is_relevant`.
    pub relevant_floor: u32,
    /// Fraction of the mean score used as the dynamic threshold.
    pub threshold_multiplier: f64,
    /// Score substituted for failed or unparseable oracle replies.
    pub lenient_score: u32,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            relevant_floor: RELEVANT_SCORE_FLOOR,
            threshold_multiplier: DYNAMIC_THRESHOLD_MULTIPLIER,
            lenient_score: LENIENT_RELEVANCE_SCORE,
        }
    }
}

impl FilterPolicy {
    pub fn with_relevant_floor(mut self, floor: u32) -> Self {
        self.relevant_floor = floor;
        self
    }

    pub fn with_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    pub fn with_lenient_score(mut self, score: u32) -> Self {
        self.lenient_score = score;
        self
    }

    pub fn validate(&self) -> Result<(), FilterPolicyError> {
        if !self.threshold_multiplier.is_finite() || self.threshold_multiplier < 0.0 {
            return Err(FilterPolicyError::InvalidMultiplier {
                value: self.threshold_multiplier,
            });
        }
        if self.relevant_floor > MAX_RELEVANCE_SCORE {
            return Err(FilterPolicyError::ScoreOutOfRange {
                field: "relevant_floor",
                value: self.relevant_floor,
            });
        }
        if self.lenient_score > MAX_RELEVANCE_SCORE {
            return Err(FilterPolicyError::ScoreOutOfRange {
                field: "lenient_score",
                value: self.lenient_score,
            });
        }
        Ok(())
    }

    pub fn verdict(&self, score: u32) -> RelevanceVerdict {
        RelevanceVerdict::from_score(score, self.relevant_floor)
    }

    pub fn lenient_verdict(&self) -> RelevanceVerdict {
        self.verdict(self.lenient_score)
    }

    /// Mean of `scores` (0.0 when empty).
    pub fn average(scores: &[u32]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64
    }

    /// `max(min_score, mean(scores) * multiplier)`.
    pub fn dynamic_threshold(&self, scores: &[u32], min_score: u32) -> f64 {
        let scaled = Self::average(scores) * self.threshold_multiplier;
        scaled.max(f64::from(min_score))
    }
}
