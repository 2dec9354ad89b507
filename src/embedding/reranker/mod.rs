pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_BATCH_SIZE, MAX_SEQ_LEN, RerankerConfig};
pub use error::RerankerError;

use candle_core::Tensor;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info, warn};

use crate::embedding::bert::CrossEncoderClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_pair_tokenizer;

struct LoadedModel {
    classifier: CrossEncoderClassifier,
    tokenizer: Tokenizer,
}

/// Candle cross-encoder.
///
/// Whether a model is loaded is decided once, at construction. An instance without a
/// model stays unavailable for its whole lifetime; scoring on it returns
/// [`RerankerError::NotAvailable`].
pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model: Option<LoadedModel>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    /// Loads the configured model. Without a `model_path` this returns an unavailable
    /// instance; a configured but broken model directory is an error.
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device("reranker");
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            info!("No reranker model path configured, reranker unavailable");
            return Ok(Self {
                device,
                config,
                model: None,
            });
        };

        if !model_path.exists() {
            return Err(RerankerError::ModelNotFound { path: model_path });
        }

        for required in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_path.join(required).exists() {
                return Err(RerankerError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(model_path = %model_path.display(), "Loading reranker model");

        let classifier = CrossEncoderClassifier::load(&model_path, &device).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            }
        })?;

        let tokenizer = load_pair_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            num_labels = classifier.num_labels(),
            "Reranker model loaded successfully"
        );

        Ok(Self {
            device,
            config,
            model: Some(LoadedModel {
                classifier,
                tokenizer,
            }),
        })
    }

    /// Like [`load`](Self::load), but a load failure yields an unavailable instance
    /// instead of an error.
    pub fn load_or_unavailable(config: RerankerConfig) -> Self {
        match Self::load(config.clone()) {
            Ok(reranker) => reranker,
            Err(e) => {
                warn!(error = %e, "Reranker model failed to load, reranker unavailable");
                Self {
                    device: candle_core::Device::Cpu,
                    config,
                    model: None,
                }
            }
        }
    }

    pub fn stub() -> Self {
        Self::load_or_unavailable(RerankerConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    pub fn score(&self, query: &str, passage: &str) -> Result<f32, RerankerError> {
        let scores = self.score_batch(query, &[passage])?;
        scores
            .into_iter()
            .next()
            .ok_or_else(|| RerankerError::InferenceFailed {
                reason: "model returned no score".to_string(),
            })
    }

    /// Scores every passage against `query`, preserving input order.
    pub fn score_batch(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        let Some(model) = &self.model else {
            return Err(RerankerError::NotAvailable {
                reason: "no reranker model loaded".to_string(),
            });
        };

        debug!(
            query_len = query.len(),
            num_passages = passages.len(),
            "Scoring passages with cross-encoder"
        );

        let mut scores = Vec::with_capacity(passages.len());
        for chunk in passages.chunks(self.config.batch_size) {
            scores.extend(self.forward_chunk(model, query, chunk)?);
        }

        Ok(scores)
    }

    fn forward_chunk(
        &self,
        model: &LoadedModel,
        query: &str,
        passages: &[&str],
    ) -> Result<Vec<f32>, RerankerError> {
        let pairs: Vec<(&str, &str)> = passages.iter().map(|p| (query, *p)).collect();
        let encodings = model.tokenizer.encode_batch(pairs, true).map_err(|e| {
            RerankerError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let rows = encodings.len();
        let seq_len = encodings.first().map(Encoding::len).unwrap_or(0);
        if rows == 0 || seq_len == 0 {
            return Ok(vec![]);
        }

        let token_ids = self.stack(&encodings, seq_len, Encoding::get_ids)?;
        let type_ids = self.stack(&encodings, seq_len, Encoding::get_type_ids)?;
        // Padded positions must be masked out, not attended to.
        let attention_mask = self.stack(&encodings, seq_len, Encoding::get_attention_mask)?;

        let scores = model
            .classifier
            .score(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| RerankerError::InferenceFailed {
                reason: e.to_string(),
            })?;

        if scores.len() != rows {
            return Err(RerankerError::InferenceFailed {
                reason: format!("expected {} scores, model returned {}", rows, scores.len()),
            });
        }

        Ok(scores)
    }

    fn stack(
        &self,
        encodings: &[Encoding],
        seq_len: usize,
        field: fn(&Encoding) -> &[u32],
    ) -> Result<Tensor, RerankerError> {
        let mut flat = Vec::with_capacity(encodings.len() * seq_len);
        for encoding in encodings {
            let values = field(encoding);
            if values.len() != seq_len {
                return Err(RerankerError::TokenizationFailed {
                    reason: format!(
                        "ragged batch: expected {} tokens, got {}",
                        seq_len,
                        values.len()
                    ),
                });
            }
            flat.extend_from_slice(values);
        }

        Ok(Tensor::from_vec(
            flat,
            (encodings.len(), seq_len),
            &self.device,
        )?)
    }
}
