use anyhow::{Context, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CompletionClient;
use crate::config::Config;
use crate::error::CallError;
use crate::llm::prompt_builder::PromptPair;

/// Minimal request/response structs for OpenAI Chat Completions API.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI-backed implementation of CompletionClient.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, cfg: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        OpenAiClient {
            client,
            api_key,
            model: cfg.model.clone(),
            api_base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            temperature: cfg.temperature,
            max_output_tokens: cfg.max_output_tokens,
        }
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }

    fn call_chat(&self, req: &ChatRequest) -> Result<String, CallError> {
        let url = self.chat_url();

        log::info!("Calling OpenAI model {:?}", &req.model);

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .context("failed to send request to OpenAI")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(CallError::Transient(anyhow!(
                "OpenAI API error: HTTP {} - {}",
                status.as_u16(),
                text
            )));
        }

        let chat_resp: ChatResponse = resp.json().context("failed to parse OpenAI response")?;

        if let Some(usage) = &chat_resp.usage {
            log::debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let content = chat_resp
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(CallError::EmptyResponse)?;

        if content.is_empty() {
            return Err(CallError::EmptyResponse);
        }

        Ok(content)
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, prompt: &PromptPair) -> Result<String, CallError> {
        log::debug!("Review prompt:\n{}", truncate(&prompt.user, 2000));

        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        };

        self.call_chat(&req)
    }
}

/// Truncate long strings for debug logging. Cuts at a char boundary so
/// multibyte source text cannot panic the log path.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...\n[truncated {} chars]", &s[..cut], s.len() - cut)
}
