use super::CompletionClient;
use crate::error::CallError;
use crate::llm::prompt_builder::PromptPair;

/// No-op client for development with --no-model or model=none.
pub struct NoopClient;

impl CompletionClient for NoopClient {
    fn complete(&self, prompt: &PromptPair) -> Result<String, CallError> {
        Ok(format!(
            "[DUMMY REVIEW] model calls disabled\n\nPrompt that would have been sent:\n{}",
            prompt.user
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_the_prompt_without_calling_anything() {
        let prompt = PromptPair {
            system: "sys".to_string(),
            user: "review fn main() {}".to_string(),
        };

        let out = NoopClient.complete(&prompt).unwrap();
        assert!(out.contains("review fn main() {}"));
        assert!(out.contains("DUMMY REVIEW"));
    }
}
