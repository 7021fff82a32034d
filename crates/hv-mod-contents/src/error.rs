use std::fmt;

/// Typed error for GitHub contents/listing operations.
///
/// `Api` carries the non-200 status and (truncated) response body so the UI
/// can distinguish access-denied / not-found / rate-limited without parsing
/// strings; `Network` means the remote was never reached.
#[derive(Debug)]
pub enum ContentsError {
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// Failed to parse response JSON
    Parse(String),
}

impl fmt::Display for ContentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentsError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            ContentsError::Network(msg) => write!(f, "Network error: {}", msg),
            ContentsError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ContentsError {}

impl From<reqwest::Error> for ContentsError {
    fn from(e: reqwest::Error) -> Self {
        ContentsError::Network(e.to_string())
    }
}
