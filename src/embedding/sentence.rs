//! Sentence embedder (BERT + mean pooling).
//!
//! Use [`EmbedderConfig::stub`] for tests without model files.

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tracing::{debug, info, warn};

use super::config::EmbedderConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::TextEmbedder;

enum EmbedderBackend {
    Model {
        model: Arc<BertModel>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding generator for semantic search (supports stub mode).
///
/// The model forward pass is stateless, so one instance can be shared
/// read-only across concurrent requests.
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &EmbedderConfig,
        device: &Device,
    ) -> Result<(BertModel, tokenizers::Tokenizer), EmbeddingError> {
        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let raw_config = std::fs::read_to_string(config.model_config_path())?;
        let bert_config: BertConfig =
            serde_json::from_str(&raw_config).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse model config: {}", e),
            })?;

        if bert_config.hidden_size != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "model hidden size {} does not match configured embedding dim {}",
                    bert_config.hidden_size, config.embedding_dim
                ),
            });
        }

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)?
        };

        // Sentence-transformers exports sometimes prefix tensors with "bert.".
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)?
        } else {
            BertModel::load(vb, &bert_config)?
        };

        Ok((model, tokenizer))
    }

    fn embed_with_model(
        &self,
        model: &BertModel,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
        text: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids: Vec<u32> = encoding
            .get_ids()
            .iter()
            .take(self.config.max_seq_len)
            .copied()
            .collect();
        if ids.is_empty() {
            return Err(EmbeddingError::TokenizationFailed {
                reason: "input produced no tokens".to_string(),
            });
        }

        let input_ids = Tensor::new(ids.as_slice(), device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = model.forward(&input_ids, &token_type_ids, None)?;

        // Mean pooling over the sequence dimension, then L2 normalisation,
        // matching the sentence-transformers recipe.
        let pooled = hidden.mean(1)?.squeeze(0)?;
        let mut vector = pooled.to_vec1::<f32>()?;
        l2_normalize(&mut vector);

        Ok(vector)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        // Deterministic pseudo-embedding: seed an xorshift generator from the
        // text bytes so identical inputs map to identical unit vectors.
        let mut seed: u64 = 0xcbf2_9ce4_8422_2325;
        for b in text.bytes() {
            seed ^= u64::from(b);
            seed = seed.wrapping_mul(0x0000_0100_0000_01b3);
        }
        if seed == 0 {
            seed = 1;
        }

        let mut state = seed;
        let mut vector: Vec<f32> = (0..self.config.embedding_dim)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                ((state >> 40) as f32 / 8_388_608.0) - 1.0
            })
            .collect();
        l2_normalize(&mut vector);
        vector
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(model, tokenizer, device, text),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dim
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
