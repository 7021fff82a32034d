use std::fmt;

use serde::{Deserialize, Serialize};

// OpenAI-compatible message format
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Typed error for Groq completion calls.
#[derive(Debug)]
pub enum GroqError {
    /// Missing API key
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Failed to parse response JSON, or the response held no text
    Parse(String),
}

impl fmt::Display for GroqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroqError::Auth(msg) => write!(f, "Auth error: {}", msg),
            GroqError::Network(msg) => write!(f, "Network error: {}", msg),
            GroqError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            GroqError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GroqError {}

impl From<reqwest::Error> for GroqError {
    fn from(e: reqwest::Error) -> Self {
        GroqError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_openai_shape() {
        let req = ChatRequest {
            model: "llama3-8b-8192".into(),
            messages: vec![
                ChatMessage { role: "system".into(), content: "be brief".into() },
                ChatMessage { role: "user".into(), content: "hi".into() },
            ],
            max_completion_tokens: 1024,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "llama3-8b-8192");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_completion_tokens"], 1024);
    }

    #[test]
    fn response_tolerates_null_content() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }

    #[test]
    fn display_auth() {
        let e = GroqError::Auth("GROQ_API_KEY not set".into());
        assert_eq!(e.to_string(), "Auth error: GROQ_API_KEY not set");
    }
}
