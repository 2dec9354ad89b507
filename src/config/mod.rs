//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SIEVE_*` environment variables.

pub mod error;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use pipeline::PipelineConfig;

use std::env;
use std::path::{Path, PathBuf};

use crate::corrective::DEFAULT_ORACLE_MODEL;
use crate::embedding::RerankerConfig;

/// Default Qdrant URL used when `SIEVE_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default collection holding parent documents.
pub const DEFAULT_PARENT_COLLECTION: &str = "greenvalue_parent";

/// Model behind the fast reranking stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FastRerankerBackend {
    /// Term-overlap scorer; needs no model files.
    #[default]
    Lexical,
    /// Small cross-encoder loaded from a model directory.
    CrossEncoder(PathBuf),
    /// No fast stage; it passes documents through.
    Disabled,
}

impl FastRerankerBackend {
    /// Parses `lexical`, `off`/`none`/`disabled`, or a model directory path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "" | "lexical" => Self::Lexical,
            "off" | "none" | "disabled" => Self::Disabled,
            _ => Self::CrossEncoder(PathBuf::from(value)),
        }
    }
}

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIEVE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Precision cross-encoder directory (BERT + tokenizer). Unset disables the stage.
    pub reranker_path: Option<PathBuf>,

    /// Fast reranking backend. Default: lexical.
    pub fast_reranker: FastRerankerBackend,

    /// Chat model used as the relevance oracle. Default: `llama3.2:3b`.
    pub oracle_model: String,

    /// Oracle calls allowed in flight per filter run. Default: `1`.
    pub oracle_concurrency: usize,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding parent documents. Default: `greenvalue_parent`.
    pub parent_collection: String,

    /// Default per-request pipeline settings.
    pub pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reranker_path: None,
            fast_reranker: FastRerankerBackend::default(),
            oracle_model: DEFAULT_ORACLE_MODEL.to_string(),
            oracle_concurrency: 1,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            parent_collection: DEFAULT_PARENT_COLLECTION.to_string(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    const ENV_RERANKER_PATH: &'static str = "SIEVE_RERANKER_PATH";
    const ENV_FAST_RERANKER: &'static str = "SIEVE_FAST_RERANKER";
    const ENV_ORACLE_MODEL: &'static str = "SIEVE_ORACLE_MODEL";
    const ENV_ORACLE_CONCURRENCY: &'static str = "SIEVE_ORACLE_CONCURRENCY";
    const ENV_QDRANT_URL: &'static str = "SIEVE_QDRANT_URL";
    const ENV_PARENT_COLLECTION: &'static str = "SIEVE_PARENT_COLLECTION";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let reranker_path = parse_optional_path_from_env(Self::ENV_RERANKER_PATH);
        let fast_reranker = env::var(Self::ENV_FAST_RERANKER)
            .map(|v| FastRerankerBackend::parse(&v))
            .unwrap_or(defaults.fast_reranker);
        let oracle_model = parse_string_from_env(Self::ENV_ORACLE_MODEL, defaults.oracle_model);
        let oracle_concurrency =
            parse_usize_from_env(Self::ENV_ORACLE_CONCURRENCY, defaults.oracle_concurrency)?;
        let qdrant_url = parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let parent_collection =
            parse_string_from_env(Self::ENV_PARENT_COLLECTION, defaults.parent_collection);
        let pipeline = PipelineConfig::from_env()?;

        Ok(Self {
            reranker_path,
            fast_reranker,
            oracle_model,
            oracle_concurrency,
            qdrant_url,
            parent_collection,
            pipeline,
        })
    }

    /// Validates paths and basic invariants (does not load models).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.reranker_path {
            check_model_dir(path)?;
        }

        if let FastRerankerBackend::CrossEncoder(ref path) = self.fast_reranker {
            check_model_dir(path)?;
        }

        if self.oracle_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        self.pipeline.validate()
    }

    /// Reranker settings for the precision stage.
    pub fn precision_reranker_config(&self) -> RerankerConfig {
        match self.reranker_path {
            Some(ref path) => RerankerConfig::new(path.clone()),
            None => RerankerConfig::stub(),
        }
    }
}

fn check_model_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound { path: path.to_path_buf() });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory { path: path.to_path_buf() });
    }
    Ok(())
}

fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_string_from_env(var_name: &str, default: String) -> String {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| ConfigError::NumberParseError {
                name: var_name,
                value,
                source: e,
            }),
        Err(_) => Ok(default),
    }
}

fn parse_u32_from_env(var_name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| ConfigError::NumberParseError {
                name: var_name,
                value,
                source: e,
            }),
        Err(_) => Ok(default),
    }
}

fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(var_name) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: var_name,
            value,
        }),
    }
}
