//! Groq completion relay.
//!
//! Groq exposes an OpenAI-compatible API; hubview only needs the
//! non-streaming chat completion call.

use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};

use hv_base::config::{GROQ_API_KEY_VAR, GROQ_MODEL_VAR, env_secret, env_value};

use crate::types::{ChatMessage, ChatRequest, ChatResponse, GroqError};

const GROQ_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const TIMEOUT_SECS: u64 = 60;
const MAX_COMPLETION_TOKENS: u32 = 2048;

/// Default model, overridable with GROQ_MODEL.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

pub struct GroqClient {
    client: Client,
    api_key: Option<SecretString>,
    model: String,
}

impl GroqClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            api_key: env_secret(GROQ_API_KEY_VAR),
            model: env_value(GROQ_MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// One blocking chat completion: system prompt + user message in, the
    /// first choice's text out.
    pub fn complete(&self, system: &str, user: &str) -> Result<String, GroqError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| GroqError::Auth("GROQ_API_KEY not set".to_string()))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: system.to_string() },
                ChatMessage { role: "user".to_string(), content: user.to_string() },
            ],
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(GROQ_API_ENDPOINT)
            .header("Authorization", format!("Bearer {}", api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GroqError::Api { status: status.as_u16(), body });
        }

        let parsed: ChatResponse = response.json().map_err(|e| GroqError::Parse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GroqError::Parse("response held no text".to_string()))
    }
}

impl Default for GroqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hits the real API — run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn complete_live_roundtrip() {
        let client = GroqClient::new();
        let answer = client
            .complete("You are a terse assistant.", "Answer with the single word: pong")
            .expect("completion failed — is GROQ_API_KEY set?");
        assert!(answer.to_lowercase().contains("pong"), "unexpected answer: {}", answer);
    }
}
