use crate::constants::{
    DEFAULT_MIN_RELEVANCE_SCORE, DEFAULT_TOP_K_FAST, DEFAULT_TOP_K_INITIAL,
    DEFAULT_TOP_K_PRECISE, MAX_RELEVANCE_SCORE,
};

use super::ConfigError;

/// Per-request knobs for [`RetrievalOrchestrator::retrieve`](crate::retrieval::RetrievalOrchestrator::retrieve).
///
/// Read-only and cheap to copy; stages never mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Candidates requested from the search backend. Default: `10`.
    pub top_k_initial: usize,

    /// Width kept by the fast reranker. Default: `10`.
    pub top_k_fast: usize,

    /// Width kept by the precision reranker. Default: `3`.
    pub top_k_precise: usize,

    /// Floor of the corrective filter's dynamic threshold. Default: `25`.
    pub min_relevance_score: u32,

    pub use_rerank: bool,

    pub use_parent_expansion: bool,

    pub use_corrective_filter: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k_initial: DEFAULT_TOP_K_INITIAL,
            top_k_fast: DEFAULT_TOP_K_FAST,
            top_k_precise: DEFAULT_TOP_K_PRECISE,
            min_relevance_score: DEFAULT_MIN_RELEVANCE_SCORE,
            use_rerank: true,
            use_parent_expansion: true,
            use_corrective_filter: true,
        }
    }
}

impl PipelineConfig {
    const ENV_TOP_K_INITIAL: &'static str = "SIEVE_TOP_K_INITIAL";
    const ENV_TOP_K_FAST: &'static str = "SIEVE_TOP_K_FAST";
    const ENV_TOP_K_PRECISE: &'static str = "SIEVE_TOP_K_PRECISE";
    const ENV_MIN_RELEVANCE_SCORE: &'static str = "SIEVE_MIN_RELEVANCE_SCORE";
    const ENV_USE_RERANK: &'static str = "SIEVE_USE_RERANK";
    const ENV_USE_PARENT_EXPANSION: &'static str = "SIEVE_USE_PARENT_EXPANSION";
    const ENV_USE_CORRECTIVE_FILTER: &'static str = "SIEVE_USE_CORRECTIVE_FILTER";

    /// Loads pipeline settings from `SIEVE_*` variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            top_k_initial: super::parse_usize_from_env(
                Self::ENV_TOP_K_INITIAL,
                defaults.top_k_initial,
            )?,
            top_k_fast: super::parse_usize_from_env(Self::ENV_TOP_K_FAST, defaults.top_k_fast)?,
            top_k_precise: super::parse_usize_from_env(
                Self::ENV_TOP_K_PRECISE,
                defaults.top_k_precise,
            )?,
            min_relevance_score: super::parse_u32_from_env(
                Self::ENV_MIN_RELEVANCE_SCORE,
                defaults.min_relevance_score,
            )?,
            use_rerank: super::parse_bool_from_env(Self::ENV_USE_RERANK, defaults.use_rerank)?,
            use_parent_expansion: super::parse_bool_from_env(
                Self::ENV_USE_PARENT_EXPANSION,
                defaults.use_parent_expansion,
            )?,
            use_corrective_filter: super::parse_bool_from_env(
                Self::ENV_USE_CORRECTIVE_FILTER,
                defaults.use_corrective_filter,
            )?,
        })
    }

    /// Checks the contract the stages assume but do not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("top_k_initial", self.top_k_initial),
            ("top_k_fast", self.top_k_fast),
            ("top_k_precise", self.top_k_precise),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroWidth { field });
            }
        }

        if self.min_relevance_score > MAX_RELEVANCE_SCORE {
            return Err(ConfigError::ScoreOutOfRange {
                value: self.min_relevance_score,
            });
        }

        Ok(())
    }

    /// Disables every optional stage: search results come back as-is.
    pub fn search_only() -> Self {
        Self {
            use_rerank: false,
            use_parent_expansion: false,
            use_corrective_filter: false,
            ..Self::default()
        }
    }
}
