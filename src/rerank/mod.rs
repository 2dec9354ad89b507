//! Reranking stages.
//!
//! - [`FastReranker`]: cheap first pass over the whole candidate set.
//! - [`PrecisionReranker`]: cross-encoder second pass over the survivors.
//!
//! Neither stage ever fails the pipeline. An absent model makes the stage an identity
//! pass-through and a failed scoring call degrades to the stage's documented default.
//! Both sorts are stable, so tied documents keep their input order.

pub mod fast;
pub mod precision;


pub use fast::FastReranker;
pub use precision::PrecisionReranker;

use std::cmp::Ordering;

use crate::document::Document;

/// Stable descending sort of `documents` by `scores`; returns the reordered pairs.
pub(crate) fn sort_by_score_desc(documents: Vec<Document>, scores: Vec<f32>) -> Vec<(Document, f32)> {
    let mut scored: Vec<(Document, f32)> = documents.into_iter().zip(scores).collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
}
