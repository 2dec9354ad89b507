use thiserror::Error;

use crate::vectordb::VectorDbError;

/// Errors surfaced by the retrieval collaborators.
///
/// [`RetrievalOrchestrator::retrieve`](super::RetrievalOrchestrator::retrieve) returns
/// whatever error the search backend reports (`SearchFailed`, or `VectorDb` for a
/// Qdrant-backed search). Expansion errors never escape it; they are logged and the
/// unexpanded chunks are returned.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("parent expansion failed: {reason}")]
    ExpansionFailed { reason: String },

    #[error(transparent)]
    VectorDb(#[from] VectorDbError),
}
