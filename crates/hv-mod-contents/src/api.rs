use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use hv_base::config::{GITHUB_TOKEN_VAR, env_secret};

use crate::error::ContentsError;
use crate::types::{DirectoryEntry, FileContent, FilePayload, RepoInfo, RepoSummary};

const GITHUB_API_BASE: &str = "https://api.github.com";
const TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("hubview/", env!("CARGO_PKG_VERSION"));
const ERROR_BODY_MAX: usize = 300;

/// Blocking adapter for the GitHub REST endpoints hubview reads from.
///
/// All calls are read-only. A token only raises rate limits; its absence is
/// not an error. No retries happen at this layer — a failed call is reported
/// as-is and the caller decides whether to re-attempt.
pub struct ContentsClient {
    client: Client,
    token: Option<SecretString>,
}

impl ContentsClient {
    pub fn new() -> Self {
        Self::with_token(env_secret(GITHUB_TOKEN_VAR))
    }

    pub fn with_token(token: Option<SecretString>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build reqwest client");
        Self { client, token }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// List the immediate children of `path` (empty string for the repo root).
    ///
    /// The contents endpoint answers with a JSON array for a directory and a
    /// bare object when the path addresses a file; the single-object case is
    /// wrapped so callers always get a sequence. Order is whatever the API
    /// returned — no re-sorting.
    pub fn list_children(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<DirectoryEntry>, ContentsError> {
        let body = self.get(&contents_url(owner, repo, path))?;
        parse_listing(&body)
    }

    /// List a user's repositories (name + id only).
    pub fn list_repositories(&self, username: &str) -> Result<Vec<RepoSummary>, ContentsError> {
        let url = format!("{}/users/{}/repos", GITHUB_API_BASE, username);
        let body = self.get(&url)?;
        serde_json::from_str(&body).map_err(|e| ContentsError::Parse(e.to_string()))
    }

    /// Fetch repository metadata (description, language, counters, license).
    pub fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo, ContentsError> {
        let url = format!("{}/repos/{}/{}", GITHUB_API_BASE, owner, repo);
        let body = self.get(&url)?;
        serde_json::from_str(&body).map_err(|e| ContentsError::Parse(e.to_string()))
    }

    /// Fetch a file's content via the contents endpoint and decode it.
    pub fn file_content(&self, owner: &str, repo: &str, path: &str) -> Result<FileContent, ContentsError> {
        let body = self.get(&contents_url(owner, repo, path))?;
        let payload: FilePayload = serde_json::from_str(&body).map_err(|e| ContentsError::Parse(e.to_string()))?;
        let text = decode_content(&payload)?;
        Ok(FileContent { name: payload.name, text })
    }

    fn get(&self, url: &str) -> Result<String, ContentsError> {
        let mut request = self.client.get(url).header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token.expose_secret()));
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        if (200..300).contains(&status) {
            Ok(body)
        } else {
            Err(ContentsError::Api { status, body: truncate(&body, ERROR_BODY_MAX).to_string() })
        }
    }
}

impl Default for ContentsClient {
    fn default() -> Self {
        Self::new()
    }
}

fn contents_url(owner: &str, repo: &str, path: &str) -> String {
    let mut url = format!("{}/repos/{}/{}/contents", GITHUB_API_BASE, owner, repo);
    if !path.is_empty() {
        url.push('/');
        url.push_str(path);
    }
    url
}

/// Normalize the contents response shape: array for a directory, bare object
/// for a file. Callers always receive a sequence.
fn parse_listing(body: &str) -> Result<Vec<DirectoryEntry>, ContentsError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ContentsError::Parse(e.to_string()))?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| ContentsError::Parse(e.to_string())),
        Value::Object(_) => {
            let entry: DirectoryEntry =
                serde_json::from_value(value).map_err(|e| ContentsError::Parse(e.to_string()))?;
            Ok(vec![entry])
        }
        other => Err(ContentsError::Parse(format!("expected object or array, got {}", json_type_name(&other)))),
    }
}

/// Decode a file payload. Binary or non-base64 content is reported as a
/// placeholder rather than an error, matching what the viewer shows.
fn decode_content(payload: &FilePayload) -> Result<String, ContentsError> {
    match (payload.encoding.as_deref(), &payload.content) {
        (Some("base64"), Some(content)) => {
            // The API wraps base64 at 60 columns
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64.decode(compact.as_bytes()).map_err(|e| ContentsError::Parse(e.to_string()))?;
            match String::from_utf8(bytes) {
                Ok(text) => Ok(text),
                Err(_) => Ok("Content not available in text format.".to_string()),
            }
        }
        _ => Ok("Content not available in text format.".to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;

    #[test]
    fn parse_listing_directory_preserves_order() {
        let body = r#"[
            {"name":"README.md","path":"README.md","type":"file","download_url":"https://raw.example/README.md"},
            {"name":"src","path":"src","type":"dir","download_url":null},
            {"name":"Cargo.toml","path":"Cargo.toml","type":"file","download_url":"https://raw.example/Cargo.toml"}
        ]"#;
        let entries = parse_listing(body).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["README.md", "src", "Cargo.toml"], "API order must be preserved");
    }

    #[test]
    fn parse_listing_single_file_wraps_into_one_element() {
        let body = r#"{"name":"main.py","path":"src/main.py","type":"file","download_url":"https://raw.example/main.py"}"#;
        let entries = parse_listing(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].path, "src/main.py");
    }

    #[test]
    fn parse_listing_empty_directory_is_empty_sequence() {
        let entries = parse_listing("[]").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn parse_listing_rejects_scalars() {
        assert!(matches!(parse_listing("42"), Err(ContentsError::Parse(_))));
        assert!(matches!(parse_listing("not json"), Err(ContentsError::Parse(_))));
    }

    #[test]
    fn contents_url_root_has_no_trailing_slash() {
        assert_eq!(contents_url("octo", "demo", ""), "https://api.github.com/repos/octo/demo/contents");
        assert_eq!(contents_url("octo", "demo", "src/lib"), "https://api.github.com/repos/octo/demo/contents/src/lib");
    }

    #[test]
    fn decode_content_handles_wrapped_base64() {
        let payload = FilePayload {
            name: "hello.txt".into(),
            encoding: Some("base64".into()),
            // "hello world\n" split across lines as the API does
            content: Some("aGVsbG8g\nd29ybGQK\n".into()),
        };
        assert_eq!(decode_content(&payload).unwrap(), "hello world\n");
    }

    #[test]
    fn decode_content_non_base64_is_placeholder() {
        let payload = FilePayload { name: "blob".into(), encoding: None, content: None };
        assert_eq!(decode_content(&payload).unwrap(), "Content not available in text format.");
    }

    #[test]
    fn decode_content_binary_is_placeholder() {
        let payload = FilePayload {
            name: "img.png".into(),
            encoding: Some("base64".into()),
            // 0xFF 0xFE — not valid UTF-8
            content: Some("//4=".into()),
        };
        assert_eq!(decode_content(&payload).unwrap(), "Content not available in text format.");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "héllo";
        let cut = truncate(s, 2);
        assert!(cut.len() <= 2);
        assert!(s.starts_with(cut));
    }

    /// Hits the real API — run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn list_children_live_root() {
        let client = ContentsClient::new();
        let entries = client.list_children("octocat", "Hello-World", "").expect("listing failed");
        assert!(entries.iter().any(|e| e.name == "README"), "expected README in octocat/Hello-World");
    }
}
