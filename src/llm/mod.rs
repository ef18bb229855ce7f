pub mod noop;
pub mod openai;
pub mod prompt_builder;
mod prompts;
pub mod retry;

use crate::error::CallError;
use crate::llm::prompt_builder::PromptPair;

/// Trait for talking to an LLM (real backend or dry-run).
///
/// One call, one prompt, one block of review text back. Retry policy lives
/// outside the client, in `retry`.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &PromptPair) -> Result<String, CallError>;
}
