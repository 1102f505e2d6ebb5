use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by text-generation calls.
///
/// [`LlmError::Timeout`] and [`LlmError::Transport`] are transient and
/// eligible for one retry; [`LlmError::Provider`] is a well-formed answer
/// from the provider (bad request, content policy, quota) and must never
/// be retried.
pub enum LlmError {
    /// The call did not complete within the configured timeout.
    #[error("LLM call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The HTTP exchange with the provider failed (connection refused,
    /// reset, gateway error).
    #[error("LLM transport failure: {message}")]
    Transport { message: String },

    /// The provider returned an error response.
    #[error("LLM provider error: {message}")]
    Provider { message: String },

    /// The provider answered without any text content.
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// Returns `true` for failures worth a single retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Timeout { .. } | LlmError::Transport { .. })
    }
}
