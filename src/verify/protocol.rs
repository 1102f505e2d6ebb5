//! Two-pass verification protocol.
//!
//! Pass 1 asks for a free-text assessment of the statement against the
//! numbered evidence; pass 2 replays statement, evidence, and the pass-1
//! answer and asks for a strictly formatted probability breakdown. Both
//! passes share the same system instructions.

use std::time::Duration;

use tracing::warn;

use crate::llm::{ChatGenerator, LlmError};

/// Shared system message for both protocol passes.
pub const SYSTEM_INSTRUCTIONS: &str = "You are a helpful AI that decides if a statement is true \
     or false, and if false, corrects it using the provided sources. Cite sources clearly.";

/// Builds the pass-1 prompt: assess the statement against numbered evidence.
pub fn build_pass1_prompt(statement: &str, combined_context: &str) -> String {
    format!(
        "Determine if the following statement is true or false. If false, rewrite it truthfully.\n\n\
         User Statement:\n\
         {statement}\n\n\
         Here are some relevant document snippets:\n\
         {combined_context}\n\n\
         Based on the provided sources, please respond as follows:\n\
         - Is the statement true or false?\n\
         - If false, provide a corrected statement.\n\
         - Cite the source(s) used in your reasoning, using their Source #.\n"
    )
}

/// Builds the pass-2 prompt: replay everything and demand the exact
/// three-line probability format.
pub fn build_pass2_prompt(statement: &str, combined_context: &str, pass1_answer: &str) -> String {
    format!(
        "You previously assessed the following statement and provided an answer.\n\n\
         ### User Statement:\n\
         {statement}\n\n\
         ### Relevant Document Snippets:\n\
         {combined_context}\n\n\
         ### Your Previous Conclusion:\n\
         {pass1_answer}\n\n\
         **Now, assign probabilities to the following categories (0% to 100%):**\n\
         - Probability that the statement is **true**.\n\
         - Probability that the statement is **false**.\n\
         - Probability that the statement is **undecided** (i.e., the sources do not provide enough evidence).\n\n\
         **Format your response exactly like this:**\n\
         - Probability True: XX%\n\
         - Probability False: XX%\n\
         - Probability Undecided: XX%\n"
    )
}

/// Runs one protocol call with a per-call timeout and a single retry on
/// transient failure. Permanent provider errors are not retried.
pub async fn call_with_retry(
    generator: &dyn ChatGenerator,
    user_prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    match call_once(generator, user_prompt, timeout).await {
        Ok(text) => Ok(text),
        Err(err) if err.is_transient() => {
            warn!(error = %err, "transient generation failure, retrying once");
            call_once(generator, user_prompt, timeout).await
        }
        Err(err) => Err(err),
    }
}

async fn call_once(
    generator: &dyn ChatGenerator,
    user_prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    tokio::time::timeout(timeout, generator.generate(SYSTEM_INSTRUCTIONS, user_prompt))
        .await
        .map_err(|_| LlmError::Timeout {
            secs: timeout.as_secs(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockChatGenerator;

    #[test]
    fn pass1_prompt_embeds_statement_and_context() {
        let prompt = build_pass1_prompt("EVs are cheap", "Source #1\nTitle: T\n");
        assert!(prompt.contains("User Statement:\nEVs are cheap"));
        assert!(prompt.contains("Source #1"));
        assert!(prompt.contains("true or false"));
    }

    #[test]
    fn pass2_prompt_replays_previous_answer() {
        let prompt = build_pass2_prompt("s", "ctx", "previous answer");
        assert!(prompt.contains("### Your Previous Conclusion:\nprevious answer"));
        assert!(prompt.contains("- Probability True: XX%"));
        assert!(prompt.contains("- Probability Undecided: XX%"));
    }

    #[tokio::test]
    async fn retries_once_on_transient_failure() {
        let generator = MockChatGenerator::with_responses(vec![
            Err(LlmError::Transport {
                message: "connection reset".into(),
            }),
            Ok("recovered".into()),
        ]);

        let answer = call_with_retry(&generator, "prompt", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(answer, "recovered");
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn does_not_retry_permanent_provider_errors() {
        let generator = MockChatGenerator::with_responses(vec![
            Err(LlmError::Provider {
                message: "invalid api key".into(),
            }),
            Ok("never reached".into()),
        ]);

        let result = call_with_retry(&generator, "prompt", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(LlmError::Provider { .. })));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn both_passes_use_shared_system_instructions() {
        let generator = MockChatGenerator::with_responses(vec![Ok("ok".into())]);
        call_with_retry(&generator, "prompt", Duration::from_secs(5))
            .await
            .unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, SYSTEM_INSTRUCTIONS);
        assert_eq!(requests[0].1, "prompt");
    }
}
