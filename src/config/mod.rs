//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERACITY_*` environment
//! variables. None of the pipeline tunables are hard-coded in core logic;
//! the [`Verifier`](crate::verify::Verifier) reads them from here.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants;
use crate::corpus::PublicationType;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERACITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding the pre-built corpus embeddings.
    pub collection: String,

    /// Directory containing `chunks.json` and `metadata.json`.
    pub corpus_dir: PathBuf,

    /// Directory with the sentence-embedding model
    /// (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_dir: Option<PathBuf>,

    /// Chat model used by the verification protocol.
    pub llm_model: String,

    /// Date-decay constant, per year of document age.
    pub alpha: f64,

    /// Raw nearest-neighbour hits requested from the index.
    pub search_top_k: u64,

    /// Ranked results kept after recency weighting.
    pub result_cap: usize,

    /// Ceiling on sources passed to the LLM per request.
    pub max_sources: usize,

    /// Token cap for each verification pass.
    pub max_tokens: u32,

    /// Sampling temperature for each verification pass.
    pub temperature: f64,

    /// Per-call timeout for LLM requests.
    pub call_timeout: Duration,

    /// Publication types eligible for retrieval.
    pub allowed_types: Vec<PublicationType>,
}

/// Default Qdrant URL used when `VERACITY_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: crate::vectordb::DEFAULT_COLLECTION_NAME.to_string(),
            corpus_dir: PathBuf::from("./corpus"),
            model_dir: None,
            llm_model: constants::DEFAULT_LLM_MODEL.to_string(),
            alpha: constants::DEFAULT_ALPHA,
            search_top_k: constants::DEFAULT_SEARCH_TOP_K,
            result_cap: constants::DEFAULT_RESULT_CAP,
            max_sources: constants::DEFAULT_MAX_SOURCES,
            max_tokens: constants::DEFAULT_MAX_TOKENS,
            temperature: constants::DEFAULT_TEMPERATURE,
            call_timeout: Duration::from_secs(constants::DEFAULT_CALL_TIMEOUT_SECS),
            allowed_types: PublicationType::all().to_vec(),
        }
    }
}

impl Config {
    const ENV_QDRANT_URL: &'static str = "VERACITY_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "VERACITY_COLLECTION";
    const ENV_CORPUS_DIR: &'static str = "VERACITY_CORPUS_DIR";
    const ENV_MODEL_DIR: &'static str = "VERACITY_MODEL_DIR";
    const ENV_LLM_MODEL: &'static str = "VERACITY_LLM_MODEL";
    const ENV_ALPHA: &'static str = "VERACITY_ALPHA";
    const ENV_SEARCH_TOP_K: &'static str = "VERACITY_SEARCH_TOP_K";
    const ENV_RESULT_CAP: &'static str = "VERACITY_RESULT_CAP";
    const ENV_MAX_SOURCES: &'static str = "VERACITY_MAX_SOURCES";
    const ENV_MAX_TOKENS: &'static str = "VERACITY_MAX_TOKENS";
    const ENV_TEMPERATURE: &'static str = "VERACITY_TEMPERATURE";
    const ENV_CALL_TIMEOUT_SECS: &'static str = "VERACITY_CALL_TIMEOUT_SECS";
    const ENV_ALLOWED_TYPES: &'static str = "VERACITY_ALLOWED_TYPES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let corpus_dir = Self::parse_path_from_env(Self::ENV_CORPUS_DIR, defaults.corpus_dir);
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let alpha = Self::parse_alpha_from_env(defaults.alpha)?;
        let search_top_k =
            Self::parse_u64_from_env(Self::ENV_SEARCH_TOP_K, defaults.search_top_k)?;
        let result_cap = Self::parse_usize_from_env(Self::ENV_RESULT_CAP, defaults.result_cap)?;
        let max_sources = Self::parse_usize_from_env(Self::ENV_MAX_SOURCES, defaults.max_sources)?;
        let max_tokens = Self::parse_u32_from_env(Self::ENV_MAX_TOKENS, defaults.max_tokens)?;
        let temperature = Self::parse_f64_from_env(Self::ENV_TEMPERATURE, defaults.temperature)?;
        let call_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_CALL_TIMEOUT_SECS,
            defaults.call_timeout.as_secs(),
        )?);
        let allowed_types = Self::parse_types_from_env(defaults.allowed_types)?;

        Ok(Self {
            qdrant_url,
            collection,
            corpus_dir,
            model_dir,
            llm_model,
            alpha,
            search_top_k,
            result_cap,
            max_sources,
            max_tokens,
            temperature,
            call_timeout,
            allowed_types,
        })
    }

    /// Validates cross-field invariants (does not touch the filesystem
    /// except for configured directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::InvalidAlpha {
                value: self.alpha.to_string(),
            });
        }

        if self.result_cap == 0 {
            return Err(ConfigError::InvalidResultCap {
                value: self.result_cap.to_string(),
            });
        }

        if self.max_sources > self.result_cap {
            return Err(ConfigError::MaxSourcesExceedsCap {
                max_sources: self.max_sources,
                result_cap: self.result_cap,
            });
        }

        if self.corpus_dir.exists() && !self.corpus_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.corpus_dir.clone(),
            });
        }

        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_alpha_from_env(default: f64) -> Result<f64, ConfigError> {
        let alpha = Self::parse_f64_from_env(Self::ENV_ALPHA, default)?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ConfigError::InvalidAlpha {
                value: alpha.to_string(),
            });
        }
        Ok(alpha)
    }

    fn parse_types_from_env(
        default: Vec<PublicationType>,
    ) -> Result<Vec<PublicationType>, ConfigError> {
        match env::var(Self::ENV_ALLOWED_TYPES) {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse().map_err(|_| ConfigError::UnknownPublicationType {
                        value: s.to_string(),
                    })
                })
                .collect(),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u32_from_env(var_name: &'static str, default: u32) -> Result<u32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::FloatParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
