use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::document::Document;

use super::collaborators::{ParentExpander, SearchBackend, expand_by_parent_id};
use super::error::RetrievalError;

/// In-memory [`SearchBackend`] returning stored documents in insertion order.
#[derive(Debug, Default)]
pub struct InMemorySearch {
    documents: Vec<Document>,
    fail: bool,
    requests: Mutex<Vec<(Option<String>, usize)>>,
}

impl InMemorySearch {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            ..Default::default()
        }
    }

    /// Backend whose every search fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// `(category_filter, limit)` of every search, in call order.
    pub fn requests(&self) -> Vec<(Option<String>, usize)> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl SearchBackend for InMemorySearch {
    async fn search(
        &self,
        _query: &str,
        category_filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Document>, RetrievalError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push((category_filter.map(str::to_string), limit));

        if self.fail {
            return Err(RetrievalError::SearchFailed {
                reason: "injected failure".to_string(),
            });
        }

        Ok(self
            .documents
            .iter()
            .filter(|d| category_filter.is_none_or(|c| d.category() == Some(c)))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// In-memory [`ParentExpander`] keyed by parent id.
#[derive(Debug, Default)]
pub struct InMemoryParentStore {
    parents: HashMap<String, Document>,
    failing_ids: HashSet<String>,
    fail_all: bool,
}

impl InMemoryParentStore {
    pub fn new<I, K>(parents: I) -> Self
    where
        I: IntoIterator<Item = (K, Document)>,
        K: Into<String>,
    {
        Self {
            parents: parents.into_iter().map(|(k, d)| (k.into(), d)).collect(),
            ..Default::default()
        }
    }

    /// Store whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Makes lookups of `parent_id` fail.
    pub fn with_failing_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.failing_ids.insert(parent_id.into());
        self
    }
}

impl ParentExpander for InMemoryParentStore {
    async fn expand(&self, documents: Vec<Document>) -> Result<Vec<Document>, RetrievalError> {
        let expanded = expand_by_parent_id(documents, move |parent_id| async move {
            if self.fail_all || self.failing_ids.contains(&parent_id) {
                return Err(RetrievalError::ExpansionFailed {
                    reason: format!("injected failure for parent '{parent_id}'"),
                });
            }
            Ok(self.parents.get(&parent_id).cloned())
        })
        .await;

        Ok(expanded)
    }
}
