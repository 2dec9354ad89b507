//! Property-based tests for the reranking and filtering stages.

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use sieve::{
    Document, FastReranker, FilterPolicy, MockOracle, MockScorer, PrecisionReranker,
    RelevanceFilter, parse_relevance_reply,
};

use common::{block_on, marked_documents, scripted_oracle};

fn documents(n: usize) -> Vec<Document> {
    (0..n).map(|i| Document::new(format!("d{i}"))).collect()
}

fn contents(documents: &[Document]) -> Vec<String> {
    documents.iter().map(|d| d.content.clone()).collect()
}

/// Property: the filter keeps at least `min(2, n)` documents of a non-empty batch,
/// and a fallback keeps exactly that many.
#[test]
fn prop_filter_keeps_at_least_two() {
    proptest!(|(
        scores in prop::collection::vec(0u32..=100, 1..16),
        min_score in 0u32..=100,
    )| {
        let filter = RelevanceFilter::new(Arc::new(scripted_oracle(&scores)));

        let outcome = block_on(filter.filter_with_outcome(
            "question",
            marked_documents(scores.len()),
            min_score,
        ));

        prop_assert!(outcome.documents.len() >= scores.len().min(2));
        prop_assert!(outcome.documents.len() <= scores.len());
        if outcome.fallback_used {
            prop_assert_eq!(outcome.documents.len(), scores.len().min(2));
        }
    });
}

/// Property: every kept document clears the threshold unless the fallback fired.
#[test]
fn prop_kept_documents_clear_threshold() {
    proptest!(|(
        scores in prop::collection::vec(0u32..=100, 1..16),
        min_score in 0u32..=100,
    )| {
        let filter = RelevanceFilter::new(Arc::new(scripted_oracle(&scores)));

        let outcome = block_on(filter.filter_with_outcome(
            "question",
            marked_documents(scores.len()),
            min_score,
        ));

        prop_assert!(outcome.threshold >= f64::from(min_score));
        if !outcome.fallback_used {
            for doc in &outcome.documents {
                let score = doc.relevance_score().unwrap_or_default();
                prop_assert!(score >= outcome.threshold);
            }
        }
    });
}

/// Property: raising every score by the same amount never lowers the threshold or
/// the number of documents kept.
#[test]
fn prop_threshold_monotonic_in_scores() {
    proptest!(|(
        scores in prop::collection::vec(0u32..=100, 1..16),
        delta in 1u32..=100,
        min_score in 0u32..=100,
    )| {
        let shifted: Vec<u32> = scores.iter().map(|s| (s + delta).min(100)).collect();
        let filter_for = |scores: &[u32]| RelevanceFilter::new(Arc::new(scripted_oracle(scores)));

        let before = block_on(filter_for(&scores).filter_with_outcome(
            "question",
            marked_documents(scores.len()),
            min_score,
        ));
        let after = block_on(filter_for(&shifted).filter_with_outcome(
            "question",
            marked_documents(shifted.len()),
            min_score,
        ));

        prop_assert!(after.threshold >= before.threshold);
        prop_assert!(after.documents.len() >= before.documents.len());
    });
}

/// Property: raising the minimum score never lets more documents clear the threshold.
#[test]
fn prop_threshold_monotonic_in_min_score() {
    proptest!(|(
        scores in prop::collection::vec(0u32..=100, 1..32),
        low in 0u32..=100,
        bump in 0u32..=100,
    )| {
        let policy = FilterPolicy::default();
        let high = (low + bump).min(100);

        let passing = |min_score: u32| {
            let threshold = policy.dynamic_threshold(&scores, min_score);
            scores.iter().filter(|s| f64::from(**s) >= threshold).count()
        };

        prop_assert!(passing(high) <= passing(low));
    });
}

/// Property: the fast reranker keeps exactly `min(width, n)` documents.
#[test]
fn prop_fast_rerank_truncation_bound() {
    proptest!(|(
        scores in prop::collection::vec(-10.0f32..10.0, 2..24),
        width in 1usize..30,
    )| {
        let table: Vec<(String, f32)> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("d{i}"), *s))
            .collect();
        let reranker = FastReranker::new(Arc::new(MockScorer::by_passage(table)));

        let result = reranker.rerank("q", documents(scores.len()), width);

        prop_assert_eq!(result.len(), width.min(scores.len()));
        for pair in result.windows(2) {
            prop_assert!(pair[0].fast_score() >= pair[1].fast_score());
        }
    });
}

/// Property: the precision reranker never returns more than `top_k` documents.
#[test]
fn prop_precision_rerank_truncation_bound() {
    proptest!(|(n in 0usize..24, top_k in 1usize..30, available in any::<bool>())| {
        let scorer = if available {
            MockScorer::uniform(0.5)
        } else {
            MockScorer::unavailable()
        };
        let reranker = PrecisionReranker::new(Arc::new(scorer));

        let result = reranker.rerank("q", documents(n), top_k);

        prop_assert_eq!(result.len(), n.min(top_k));
    });
}

/// Property: an unavailable fast model leaves the list exactly as it was.
#[test]
fn prop_unavailable_fast_model_is_identity() {
    proptest!(|(n in 0usize..24, width in 1usize..30)| {
        let scorer = Arc::new(MockScorer::unavailable());
        let reranker = FastReranker::new(scorer.clone());
        let input = documents(n);

        let result = reranker.rerank("q", input.clone(), width);

        prop_assert_eq!(result, input);
        prop_assert_eq!(scorer.call_count(), 0);
    });
}

/// Property: equal scores keep their input order.
#[test]
fn prop_ties_are_stable() {
    proptest!(|(n in 2usize..24, top_k in 1usize..30)| {
        let reranker = PrecisionReranker::new(Arc::new(MockScorer::uniform(1.0)));

        let result = reranker.rerank("q", documents(n), top_k);

        let expected: Vec<String> = contents(&documents(n)).into_iter().take(top_k).collect();
        prop_assert_eq!(contents(&result), expected);
    });
}

/// Property: parsed scores are always within 0..=100 and round-trip plain integers.
#[test]
fn prop_parse_reply_bounds() {
    proptest!(|(reply in ".{0,12}", score in 0u32..=100)| {
        if let Some(parsed) = parse_relevance_reply(&reply) {
            prop_assert!(parsed <= 100);
        }
        prop_assert_eq!(parse_relevance_reply(&score.to_string()), Some(score));
        prop_assert_eq!(parse_relevance_reply(&format!("  {score}/100")), Some(score));
    });
}

/// Property: a failing oracle grades everything leniently and keeps the whole batch.
#[test]
fn prop_oracle_outage_keeps_everything() {
    proptest!(|(n in 1usize..12, min_score in 0u32..=70)| {
        let filter = RelevanceFilter::new(Arc::new(MockOracle::failing()));

        let result = block_on(filter.filter("question", marked_documents(n), min_score));

        prop_assert_eq!(result.len(), n);
    });
}
