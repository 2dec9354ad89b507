//! Retrieval orchestration.
//!
//! [`RetrievalOrchestrator`] chains the pipeline for one query:
//!
//! 1. search ([`SearchBackend`]) for `top_k_initial` candidates
//! 2. fast rerank to `top_k_fast`
//! 3. precision rerank to `top_k_precise`
//! 4. corrective relevance filter
//! 5. parent expansion ([`ParentExpander`])
//!
//! Steps 2–5 are each switched by [`PipelineConfig`](crate::config::PipelineConfig)
//! and degrade to pass-through when their model or collaborator is missing.

pub mod collaborators;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod orchestrator;


pub use collaborators::{NoParentExpansion, ParentExpander, SearchBackend};
pub(crate) use collaborators::expand_by_parent_id;
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{InMemoryParentStore, InMemorySearch};
pub use orchestrator::RetrievalOrchestrator;
