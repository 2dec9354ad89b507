use std::cmp::Reverse;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::constants::{FALLBACK_KEEP, RELEVANCE_SCORE_KEY, RELEVANT_FLAG_KEY};
use crate::document::Document;

use super::error::FilterPolicyError;
use super::oracle::{RelevanceOracle, grading_prompt};
use super::parse::parse_relevance_reply;
use super::policy::FilterPolicy;
use super::types::{FilterOutcome, RelevanceVerdict};

/// Corrective relevance filter.
///
/// Grades every document with the oracle, keeps those at or above a threshold derived
/// from the batch's own mean score, and never returns fewer than two documents (or the
/// whole input, if smaller): when the threshold keeps too few, the best-scoring
/// discarded documents top the result up.
#[derive(Clone)]
pub struct RelevanceFilter {
    oracle: Arc<dyn RelevanceOracle>,
    policy: FilterPolicy,
    concurrency: usize,
}

impl std::fmt::Debug for RelevanceFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceFilter")
            .field("policy", &self.policy)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl RelevanceFilter {
    /// Filter with the default policy, grading one document at a time.
    pub fn new(oracle: Arc<dyn RelevanceOracle>) -> Self {
        Self {
            oracle,
            policy: FilterPolicy::default(),
            concurrency: 1,
        }
    }

    pub fn with_policy(mut self, policy: FilterPolicy) -> Result<Self, FilterPolicyError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Allows up to `concurrency` oracle calls in flight. Verdicts stay in input order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    /// Filters `documents`, returning the survivors.
    pub async fn filter(&self, query: &str, documents: Vec<Document>, min_score: u32) -> Vec<Document> {
        self.filter_with_outcome(query, documents, min_score)
            .await
            .documents
    }

    /// Filters `documents` and reports the verdicts and threshold behind the result.
    pub async fn filter_with_outcome(
        &self,
        query: &str,
        mut documents: Vec<Document>,
        min_score: u32,
    ) -> FilterOutcome {
        if documents.is_empty() {
            return FilterOutcome::empty();
        }

        let verdicts = self.grade_all(query, &documents).await;

        for (doc, verdict) in documents.iter_mut().zip(&verdicts) {
            doc.metadata
                .insert(RELEVANCE_SCORE_KEY.to_string(), verdict.score.into());
            doc.metadata
                .insert(RELEVANT_FLAG_KEY.to_string(), verdict.is_relevant.into());
        }

        // The threshold is a batch aggregate: it needs every verdict first.
        let scores: Vec<u32> = verdicts.iter().map(|v| v.score).collect();
        let average_score = FilterPolicy::average(&scores);
        let threshold = self.policy.dynamic_threshold(&scores, min_score);

        let input_len = documents.len();
        let mut scored: Vec<(Document, u32)> = documents.into_iter().zip(scores).collect();

        let minimum = FALLBACK_KEEP.min(input_len);
        let passing = scored
            .iter()
            .filter(|(_, score)| f64::from(*score) >= threshold)
            .count();
        let fallback_used = passing < minimum;

        let kept: Vec<Document> = if fallback_used {
            // Everything that passed outscores everything that did not, so the best
            // `minimum` documents are the passing ones topped up with the strongest rest.
            scored.sort_by_key(|(_, score)| Reverse(*score));
            warn!(
                threshold,
                average_score,
                passing,
                kept = minimum,
                "Too few documents met the relevance threshold, keeping best-scoring documents"
            );
            scored
                .into_iter()
                .take(minimum)
                .map(|(doc, _)| doc)
                .collect()
        } else {
            scored
                .into_iter()
                .filter(|(_, score)| f64::from(*score) >= threshold)
                .map(|(doc, _)| doc)
                .collect()
        };

        info!(
            input = input_len,
            kept = kept.len(),
            threshold,
            average_score,
            "Corrective filter complete"
        );

        FilterOutcome {
            documents: kept,
            average_score,
            threshold,
            verdicts,
            fallback_used,
        }
    }

    /// Grades every document, in input order.
    pub async fn grade_all(&self, query: &str, documents: &[Document]) -> Vec<RelevanceVerdict> {
        stream::iter(documents.iter().map(|doc| self.grade(query, doc)))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Grades one document. Oracle failures and unparseable replies yield the lenient
    /// verdict.
    pub async fn grade(&self, query: &str, document: &Document) -> RelevanceVerdict {
        let prompt = grading_prompt(query, &document.content);

        match self.oracle.complete(&prompt).await {
            Ok(reply) => match parse_relevance_reply(&reply) {
                Some(score) => {
                    let verdict = self.policy.verdict(score);
                    debug!(%verdict, "Graded document");
                    verdict
                }
                None => {
                    warn!(
                        reply = %crate::document::truncate_chars(&reply, 32),
                        "Oracle reply had no score, using lenient default"
                    );
                    self.policy.lenient_verdict()
                }
            },
            Err(e) => {
                warn!(error = %e, "Oracle call failed, using lenient default");
                self.policy.lenient_verdict()
            }
        }
    }
}
