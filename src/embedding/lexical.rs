//! Keyword-overlap relevance scorer.
//!
//! Cheap enough to run over a whole candidate set, which makes it the default
//! first-pass model. Scores are in `[0, 1]`.

use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
    "through", "during", "before", "after", "above", "below", "between", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "just", "and", "but", "if", "or", "because", "until", "while",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "it", "its",
];

const RECALL_WEIGHT: f32 = 0.6;
const JACCARD_WEIGHT: f32 = 0.4;
const LOGISTIC_STEEPNESS: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct LexicalScorer {
    stop_words: HashSet<&'static str>,
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalScorer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn terms<'a>(&self, text: &'a str) -> HashSet<&'a str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !self.stop_words.contains(w))
            .collect()
    }

    /// Scores `passage` against `query`.
    pub fn score(&self, query: &str, passage: &str) -> f32 {
        let query_lower = query.to_lowercase();
        let passage_lower = passage.to_lowercase();
        let query_terms = self.terms(&query_lower);
        let passage_terms = self.terms(&passage_lower);

        if query_terms.is_empty() {
            let shorter = query.len().min(passage.len()) as f32;
            let longer = query.len().max(passage.len()).max(1) as f32;
            return (shorter / longer) * 0.3;
        }

        let matches = query_terms.intersection(&passage_terms).count();
        let recall = matches as f32 / query_terms.len() as f32;

        let union = query_terms.union(&passage_terms).count();
        let jaccard = if union > 0 {
            matches as f32 / union as f32
        } else {
            0.0
        };

        let blended = RECALL_WEIGHT * recall + JACCARD_WEIGHT * jaccard;
        let squashed = 1.0 / (1.0 + (-LOGISTIC_STEEPNESS * (blended - 0.5)).exp());

        squashed.clamp(0.0, 1.0)
    }
}
