use std::collections::HashSet;
use std::future::Future;

use tracing::warn;

use crate::constants::{
    FAST_SCORE_KEY, PRECISION_SCORE_KEY, RELEVANCE_SCORE_KEY, RELEVANT_FLAG_KEY,
};
use crate::document::Document;

use super::error::RetrievalError;

/// Source of candidate documents for a query.
pub trait SearchBackend: Send + Sync {
    /// Returns up to `limit` candidates, optionally restricted to a category.
    fn search(
        &self,
        query: &str,
        category_filter: Option<&str>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Document>, RetrievalError>> + Send;
}

/// Replaces chunks with the parent documents they were cut from.
pub trait ParentExpander: Send + Sync {
    fn expand(
        &self,
        documents: Vec<Document>,
    ) -> impl Future<Output = Result<Vec<Document>, RetrievalError>> + Send;
}

/// Expander that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParentExpansion;

impl ParentExpander for NoParentExpansion {
    async fn expand(&self, documents: Vec<Document>) -> Result<Vec<Document>, RetrievalError> {
        Ok(documents)
    }
}

const STAGE_KEYS: [&str; 4] = [
    FAST_SCORE_KEY,
    PRECISION_SCORE_KEY,
    RELEVANCE_SCORE_KEY,
    RELEVANT_FLAG_KEY,
];

/// Shared parent-expansion walk used by the concrete expanders.
///
/// Each chunk with a `parent_id` is replaced by its parent the first time that parent
/// is seen; later chunks of the same parent are dropped. Chunks without a `parent_id`,
/// or whose parent `lookup` cannot find or fails to fetch, are kept as they are. A
/// failed lookup only affects its own chunk. The parent inherits the stage annotations
/// of the chunk that introduced it. An empty walk returns the input.
pub(crate) async fn expand_by_parent_id<F, Fut, E>(
    documents: Vec<Document>,
    mut lookup: F,
) -> Vec<Document>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<Document>, E>>,
    E: std::fmt::Display,
{
    let mut seen = HashSet::new();
    let mut expanded = Vec::with_capacity(documents.len());

    for chunk in &documents {
        let Some(parent_id) = chunk.parent_id() else {
            expanded.push(chunk.clone());
            continue;
        };

        if seen.contains(&parent_id) {
            continue;
        }

        match lookup(parent_id.clone()).await {
            Ok(Some(mut parent)) => {
                for key in STAGE_KEYS {
                    if let Some(value) = chunk.metadata.get(key) {
                        parent
                            .metadata
                            .entry(key.to_string())
                            .or_insert_with(|| value.clone());
                    }
                }
                seen.insert(parent_id);
                expanded.push(parent);
            }
            Ok(None) => expanded.push(chunk.clone()),
            Err(e) => {
                warn!(%parent_id, error = %e, "Parent lookup failed, keeping chunk");
                expanded.push(chunk.clone());
            }
        }
    }

    if expanded.is_empty() {
        return documents;
    }

    expanded
}
