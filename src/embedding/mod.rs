//! Relevance models.
//!
//! - [`reranker`] provides the candle cross-encoder used for precision reranking.
//! - [`lexical`] provides the keyword-overlap scorer used as the default fast reranker.

/// Sequence-classification head on top of a BERT/RoBERTa encoder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Keyword-overlap scorer.
pub mod lexical;
/// Cross-encoder reranker.
pub mod reranker;
/// Tokenizer loading helpers.
pub mod utils;

pub use lexical::LexicalScorer;
pub use reranker::{MAX_SEQ_LEN, Reranker, RerankerConfig, RerankerError};
