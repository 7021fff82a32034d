use std::fmt;

use serde::{Deserialize, Serialize};

// ─── JDoodle Execute API Types ───

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExecuteRequest {
    pub client_id: String,
    pub client_secret: String,
    pub script: String,
    pub language: String,
    pub version_index: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExecuteResponse {
    pub output: Option<String>,
    pub status_code: Option<i32>,
    pub memory: Option<String>,
    pub cpu_time: Option<String>,
}

/// Relayed result of one remote execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOutcome {
    pub output: String,
    pub status_code: i32,
    pub memory: Option<String>,
    pub cpu_time: Option<String>,
}

/// Typed error for remote code execution calls.
#[derive(Debug)]
pub enum CompileError {
    /// Missing client id or secret
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Failed to parse response JSON
    Parse(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Auth(msg) => write!(f, "Auth error: {}", msg),
            CompileError::Network(msg) => write!(f, "Network error: {}", msg),
            CompileError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            CompileError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<reqwest::Error> for CompileError {
    fn from(e: reqwest::Error) -> Self {
        CompileError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_names() {
        let req = ExecuteRequest {
            client_id: "id".into(),
            client_secret: "secret".into(),
            script: "print(1)".into(),
            language: "python3".into(),
            version_index: "4".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["clientId"], "id");
        assert_eq!(value["clientSecret"], "secret");
        assert_eq!(value["versionIndex"], "4");
    }

    #[test]
    fn response_deserializes_camel_case() {
        let resp: ExecuteResponse =
            serde_json::from_str(r#"{"output":"1\n","statusCode":200,"memory":"7900","cpuTime":"0.01"}"#).unwrap();
        assert_eq!(resp.output.as_deref(), Some("1\n"));
        assert_eq!(resp.status_code, Some(200));
        assert_eq!(resp.cpu_time.as_deref(), Some("0.01"));
    }
}
