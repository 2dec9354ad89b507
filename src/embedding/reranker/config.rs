use std::path::PathBuf;

/// Token limit of a (query, passage) pair; longer pairs are truncated.
pub const MAX_SEQ_LEN: usize = 512;

/// Pairs scored per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct RerankerConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_path: Option<PathBuf>,

    pub max_seq_len: usize,

    pub batch_size: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: MAX_SEQ_LEN,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl RerankerConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Config without a model; the resulting [`Reranker`](super::Reranker) is unavailable.
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be greater than 0");
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than 0".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }

    /// Reads the model directory from `path_var` and the batch size from
    /// `SIEVE_RERANKER_BATCH_SIZE`.
    pub fn from_env(path_var: &str) -> Self {
        let model_path = std::env::var(path_var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let batch_size = std::env::var("SIEVE_RERANKER_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_BATCH_SIZE);

        Self {
            model_path,
            batch_size,
            ..Default::default()
        }
    }
}
