use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::path::Path;

/// Fields of `config.json` the classification head needs beyond the encoder config.
#[derive(Debug, Default, Deserialize)]
struct HeadConfig {
    #[serde(default)]
    num_labels: Option<usize>,
    #[serde(default)]
    id2label: Option<std::collections::HashMap<String, String>>,
}

impl HeadConfig {
    fn num_labels(&self) -> usize {
        self.num_labels
            .or_else(|| self.id2label.as_ref().map(|m| m.len()))
            .filter(|n| *n > 0)
            .unwrap_or(1)
    }
}

struct SequenceClassifier {
    encoder: BertModel,
    head: Linear,
    num_labels: usize,
}

impl SequenceClassifier {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        // Exported checkpoints prefix the encoder differently depending on the family.
        let encoder = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("roberta"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        let head = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            encoder,
            head,
            num_labels,
        })
    }

    fn logits(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let hidden = self
            .encoder
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls = hidden.i((.., 0, ..))?;
        self.head.forward(&cls)
    }
}

/// Cross-encoder relevance classifier: one score per (query, passage) row.
#[derive(Clone)]
pub struct CrossEncoderClassifier(std::sync::Arc<SequenceClassifier>);

impl CrossEncoderClassifier {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;

        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let head: HeadConfig = serde_json::from_str(&config_content).unwrap_or_default();

        let weights_path = model_dir.join("model.safetensors");
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = SequenceClassifier::load(vb, &config, head.num_labels())?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    pub fn num_labels(&self) -> usize {
        self.0.num_labels
    }

    /// Returns one relevance score per batch row.
    ///
    /// Single-logit heads return the raw logit; multi-label heads return the logit of
    /// the last ("relevant") label.
    pub fn score(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Vec<f32>> {
        let logits = self.0.logits(input_ids, token_type_ids, attention_mask)?;
        let rows = logits.to_vec2::<f32>()?;
        Ok(rows
            .into_iter()
            .map(|row| row.last().copied().unwrap_or(f32::NEG_INFINITY))
            .collect())
    }
}
