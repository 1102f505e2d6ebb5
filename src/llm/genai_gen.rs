use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use super::ChatGenerator;
use super::error::LlmError;

/// Text-generation provider backed by `genai`.
///
/// Model name, token cap and temperature are fixed at construction —
/// they are configuration, never per-request input.
pub struct GenAiGenerator {
    client: genai::Client,
    model: String,
    options: ChatOptions,
}

impl std::fmt::Debug for GenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiGenerator")
            .field("model", &self.model)
            .finish()
    }
}

impl GenAiGenerator {
    /// Creates a generator for `model` with fixed sampling settings.
    ///
    /// Provider credentials are resolved by `genai` from the environment.
    pub fn new(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        let options = ChatOptions::default()
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);

        Self {
            client: genai::Client::default(),
            model: model.into(),
            options,
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatGenerator for GenAiGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(user),
        ]);

        debug!(model = %self.model, user_len = user.len(), "Dispatching chat request");

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(classify_error)?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        Ok(text.to_string())
    }
}

/// Maps a `genai` failure onto the retry taxonomy.
///
/// The web-call variants wrap the HTTP exchange itself — connection
/// refused, reset, gateway errors — and are transient, so the protocol's
/// single retry applies to them. Everything raised before or after the
/// exchange (auth resolution, request shaping, response decoding) is a
/// permanent [`LlmError::Provider`] and is never retried.
fn classify_error(err: genai::Error) -> LlmError {
    match &err {
        genai::Error::WebAdapterCall { .. } | genai::Error::WebModelCall { .. } => {
            LlmError::Transport {
                message: err.to_string(),
            }
        }
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
