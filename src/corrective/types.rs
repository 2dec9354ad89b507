use crate::constants::{LENIENT_RELEVANCE_SCORE, RELEVANT_SCORE_FLOOR};
use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The oracle's judgement of one document.
pub struct RelevanceVerdict {
    /// `score >= relevant floor`; independent of the dynamic threshold.
    pub is_relevant: bool,
    /// Relevance in `[0, 100]`.
    pub score: u32,
}

impl RelevanceVerdict {
    /// Builds a verdict against the given relevant floor.
    pub fn from_score(score: u32, relevant_floor: u32) -> Self {
        Self {
            is_relevant: score >= relevant_floor,
            score,
        }
    }

    /// The verdict used when the oracle fails or replies without a score.
    pub fn lenient() -> Self {
        Self::from_score(LENIENT_RELEVANCE_SCORE, RELEVANT_SCORE_FLOOR)
    }
}

impl std::fmt::Display for RelevanceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = if self.is_relevant {
            "RELEVANT"
        } else {
            "IRRELEVANT"
        };
        write!(f, "{} (score: {})", label, self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of one filter run, with the numbers that produced it.
pub struct FilterOutcome {
    /// Surviving documents. Threshold survivors keep input order; fallback survivors
    /// are sorted by descending score.
    pub documents: Vec<Document>,
    /// Mean of every verdict score (0.0 for empty input).
    pub average_score: f64,
    /// `max(min_score, average_score * multiplier)`.
    pub threshold: f64,
    /// Verdicts for every input document, index-aligned with the input.
    pub verdicts: Vec<RelevanceVerdict>,
    /// Whether the threshold kept fewer than two documents (or fewer than the whole
    /// input, if smaller) and the fallback selected the survivors by score.
    pub fallback_used: bool,
}

impl FilterOutcome {
    pub(crate) fn empty() -> Self {
        Self {
            documents: Vec::new(),
            average_score: 0.0,
            threshold: 0.0,
            verdicts: Vec::new(),
            fallback_used: false,
        }
    }
}
