//! Cross-cutting, shared constants.
//!
//! The prefix lengths change what each model "sees" and are part of the scoring
//! contract. Keep them in one place so the stages and their tests cannot drift.

/// Characters of document content passed to the fast reranking model.
pub const FAST_CONTENT_PREFIX: usize = 500;

/// Characters of document content passed to the precision cross-encoder.
pub const PRECISION_CONTENT_PREFIX: usize = 500;

/// Characters of document content embedded in a relevance-oracle prompt.
pub const ORACLE_CONTENT_PREFIX: usize = 300;

/// Characters of the query embedded in a relevance-oracle prompt.
pub const ORACLE_QUERY_PREFIX: usize = 200;

/// Characters of the oracle reply scanned for a score.
pub const ORACLE_REPLY_SCAN_CHARS: usize = 5;

/// Upper bound of a relevance score.
pub const MAX_RELEVANCE_SCORE: u32 = 100;

/// Score assigned when the oracle fails or replies without digits.
pub const LENIENT_RELEVANCE_SCORE: u32 = 70;

/// Absolute floor for the `is_relevant` verdict.
pub const RELEVANT_SCORE_FLOOR: u32 = 25;

/// Fraction of the mean score used as the dynamic threshold.
pub const DYNAMIC_THRESHOLD_MULTIPLIER: f64 = 0.6;

/// Minimum documents the relevance filter keeps from a non-empty batch.
pub const FALLBACK_KEEP: usize = 2;

/// Metadata key written by the fast reranker.
pub const FAST_SCORE_KEY: &str = "fast_rerank_score";

/// Metadata key written by the precision reranker.
pub const PRECISION_SCORE_KEY: &str = "cross_encoder_score";

/// Metadata key written by the relevance filter.
pub const RELEVANCE_SCORE_KEY: &str = "relevance_score";

/// Metadata key holding the relevance filter's boolean verdict.
pub const RELEVANT_FLAG_KEY: &str = "is_relevant";

/// Metadata key the search backend uses for category filtering.
pub const CATEGORY_KEY: &str = "category";

/// Metadata key linking a chunk to its parent document.
pub const PARENT_ID_KEY: &str = "parent_id";

pub const DEFAULT_TOP_K_INITIAL: usize = 10;
pub const DEFAULT_TOP_K_FAST: usize = 10;
pub const DEFAULT_TOP_K_PRECISE: usize = 3;
pub const DEFAULT_MIN_RELEVANCE_SCORE: u32 = RELEVANT_SCORE_FLOOR;
