use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::ChatGenerator;
use super::error::LlmError;

/// Scripted stand-in for a text-generation provider.
///
/// Responses are popped in order; the call log and counter let tests assert
/// exactly how many provider calls a pipeline run made and what it sent.
#[derive(Default)]
pub struct MockChatGenerator {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl MockChatGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers with `responses`, in order.
    pub fn with_responses(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    /// Appends one scripted response.
    pub fn push_response(&self, response: Result<String, LlmError>) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(response);
    }

    /// Number of `generate` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (system, user) pairs in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().expect("request lock poisoned").clone()
    }
}

#[async_trait]
impl ChatGenerator for MockChatGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("request lock poisoned")
            .push((system.to_string(), user.to_string()));

        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or(Err(LlmError::Provider {
                message: "mock script exhausted".to_string(),
            }))
    }
}
