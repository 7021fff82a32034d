use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};

use hv_base::config::{GOOGLE_API_KEY_VAR, GOOGLE_CSE_ID_VAR, env_secret, env_value};

use crate::types::{GoogleSearchResponse, SearchError, SearchResult};

const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const TIMEOUT_SECS: u64 = 10;
const RESULT_COUNT: u32 = 8;

pub struct SearchClient {
    client: Client,
    api_key: Option<SecretString>,
    cse_id: Option<String>,
}

impl SearchClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");
        Self { client, api_key: env_secret(GOOGLE_API_KEY_VAR), cse_id: env_value(GOOGLE_CSE_ID_VAR) }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.cse_id.is_some()
    }

    /// Run one Custom Search query and relay the top hits.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let api_key =
            self.api_key.as_ref().ok_or_else(|| SearchError::Auth("GOOGLE_API_KEY not set".to_string()))?;
        let cse_id = self.cse_id.as_ref().ok_or_else(|| SearchError::Auth("GOOGLE_CSE_ID not set".to_string()))?;

        let url = format!(
            "{}?key={}&cx={}&q={}&num={}",
            GOOGLE_SEARCH_ENDPOINT,
            urlenc(api_key.expose_secret()),
            urlenc(cse_id),
            urlenc(query),
            RESULT_COUNT,
        );

        let response = self.client.get(&url).header("Accept", "application/json").send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SearchError::Api { status: status.as_u16(), body });
        }

        let parsed: GoogleSearchResponse = response.json().map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchResult {
                title: item.title.unwrap_or_else(|| "No title".to_string()),
                link: item.link.unwrap_or_default(),
                snippet: item.snippet.unwrap_or_else(|| "No description available".to_string()),
            })
            .collect())
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompt pair handed to the LLM to turn raw hits into a readable digest.
/// Kept here so the result shape and its presentation stay together; the
/// application composes it with whatever completion client it holds.
pub fn digest_prompt(query: &str, results: &[SearchResult]) -> (String, String) {
    let system = "You are an assistant that organizes web search results for developers. \
                  Group related links, keep every URL verbatim, and stay concise."
        .to_string();
    let mut user = format!("Search query: {}\n\nResults:\n", query);
    for (i, result) in results.iter().enumerate() {
        user.push_str(&format!("{}. {}\n   {}\n   {}\n", i + 1, result.title, result.link, result.snippet));
    }
    user.push_str("\nFormat these results as a short, readable markdown digest with the most useful links first.");
    (system, user)
}

/// Simple URL encoding for query parameters.
fn urlenc(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str) -> SearchResult {
        SearchResult { title: title.into(), link: link.into(), snippet: "snippet".into() }
    }

    #[test]
    fn urlenc_escapes_reserved_chars() {
        assert_eq!(urlenc("a b&c"), "a%20b%26c");
        assert_eq!(urlenc("safe-chars_.~"), "safe-chars_.~");
    }

    #[test]
    fn digest_prompt_lists_every_link() {
        let results = vec![hit("One", "https://one.example"), hit("Two", "https://two.example")];
        let (_, user) = digest_prompt("demo rust", &results);
        assert!(user.contains("Search query: demo rust"));
        assert!(user.contains("https://one.example"));
        assert!(user.contains("https://two.example"));
        assert!(user.contains("2. Two"));
    }
}
