//! Sieve: multi-stage relevance pipeline for retrieval-augmented generation.
//!
//! A query's candidate documents pass through up to four stages, each narrower and
//! more expensive than the last:
//!
//! 1. [`FastReranker`] - a lightweight model cuts the candidate set down.
//! 2. [`PrecisionReranker`] - a cross-encoder scores the first 500 characters.
//! 3. [`RelevanceFilter`] - an LLM oracle grades each document 0–100 and a
//!    batch-relative threshold drops the weak ones (never everything).
//! 4. Parent expansion - chunks are swapped for the documents they came from.
//!
//! [`RetrievalOrchestrator`] wires the stages to a [`SearchBackend`] and a
//! [`ParentExpander`]. Every stage degrades to pass-through when its model is
//! missing or a call fails; only a failed search is reported as an error.
//!
//! ## Public API
//! - [`Document`] - content plus the metadata each stage annotates
//! - [`Config`], [`PipelineConfig`] - `SIEVE_*` environment configuration
//! - [`PassageScorer`], [`Reranker`], [`LexicalScorer`] - scoring models
//! - [`RelevanceOracle`], [`GenaiOracle`] - relevance grading
//! - [`QdrantParentStore`] - parent lookup in Qdrant
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corrective;
pub mod document;
pub mod embedding;
pub mod rerank;
pub mod retrieval;
pub mod scoring;
pub mod vectordb;

pub use config::{Config, ConfigError, FastRerankerBackend, PipelineConfig};
pub use corrective::{
    FilterOutcome, FilterPolicy, FilterPolicyError, GenaiOracle, OracleError, RelevanceFilter,
    RelevanceOracle, RelevanceVerdict, parse_relevance_reply,
};
#[cfg(any(test, feature = "mock"))]
pub use corrective::MockOracle;
pub use document::Document;
pub use embedding::{LexicalScorer, Reranker, RerankerConfig, RerankerError};
pub use rerank::{FastReranker, PrecisionReranker};
pub use retrieval::{
    NoParentExpansion, ParentExpander, RetrievalError, RetrievalOrchestrator, SearchBackend,
};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::{InMemoryParentStore, InMemorySearch};
pub use scoring::{PassageScorer, ScoringError};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScorer;
pub use vectordb::{QdrantClient, QdrantParentStore, VectorDbError};
