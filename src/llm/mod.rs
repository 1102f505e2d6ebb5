//! Text-generation provider access.
//!
//! The verification protocol only needs unary (system, user) → text calls;
//! [`ChatGenerator`] is that seam. [`GenAiGenerator`] is the production
//! implementation; [`MockChatGenerator`] scripts responses for tests.

pub mod error;
pub mod genai_gen;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::LlmError;
pub use genai_gen::GenAiGenerator;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatGenerator;

use async_trait::async_trait;

/// Unary text-generation call.
#[async_trait]
pub trait ChatGenerator: Send + Sync {
    /// Generates a completion for one system/user message pair.
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError>;
}
