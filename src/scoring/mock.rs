use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{PassageScorer, ScoringError};

type ScoreFn = Box<dyn Fn(&str, &str) -> f32 + Send + Sync>;

/// Scripted [`PassageScorer`] for tests.
///
/// Counts calls and records the passages it was shown, so tests can assert both what
/// a stage returned and what it sent to the model.
pub struct MockScorer {
    name: String,
    available: bool,
    fail: bool,
    score_fn: ScoreFn,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl std::fmt::Debug for MockScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockScorer")
            .field("name", &self.name)
            .field("available", &self.available)
            .field("fail", &self.fail)
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl MockScorer {
    /// Scores with `f(query, passage)`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> f32 + Send + Sync + 'static,
    {
        Self {
            name: "mock".to_string(),
            available: true,
            fail: false,
            score_fn: Box::new(f),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Gives every passage the same score.
    pub fn uniform(score: f32) -> Self {
        Self::from_fn(move |_, _| score)
    }

    /// Looks passages up by exact text; unknown passages score `0.0`.
    pub fn by_passage<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let table: HashMap<String, f32> = scores.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::from_fn(move |_, passage| table.get(passage).copied().unwrap_or(0.0))
    }

    /// A scorer whose model never loaded.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::uniform(0.0)
        }
    }

    /// An available scorer whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::uniform(0.0)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every passage passed to [`score_batch`](PassageScorer::score_batch), in call order.
    pub fn seen_passages(&self) -> Vec<String> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

impl PassageScorer for MockScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("lock poisoned")
            .extend(passages.iter().map(|p| p.to_string()));

        if !self.available {
            return Err(ScoringError::Unavailable {
                scorer: self.name.clone(),
            });
        }

        if self.fail {
            return Err(ScoringError::ComputationFailed {
                reason: "injected failure".to_string(),
            });
        }

        Ok(passages
            .iter()
            .map(|p| (self.score_fn)(query, p))
            .collect())
    }
}
