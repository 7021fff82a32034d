use std::fmt;

use serde::Deserialize;

// ─── Google Custom Search Response Types ───

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleSearchResponse {
    pub items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleSearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// One relayed search hit with the fields the UI and the digest prompt use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// What kind of resources the user is hunting for. Everything except
/// `Custom` seeds the query from the repository's name and language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Tutorials,
    Documentation,
    Examples,
    Custom,
}

impl SearchKind {
    pub const ORDER: [SearchKind; 4] =
        [SearchKind::Tutorials, SearchKind::Documentation, SearchKind::Examples, SearchKind::Custom];

    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Tutorials => "Tutorials",
            SearchKind::Documentation => "Documentation",
            SearchKind::Examples => "Examples",
            SearchKind::Custom => "Custom Search",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|k| *k == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    /// Seed query for this kind, given "{repo} {language}" context.
    pub fn seed_query(self, repo: &str, language: &str) -> String {
        let base = if language.is_empty() { repo.to_string() } else { format!("{} {}", repo, language) };
        match self {
            SearchKind::Tutorials => format!("tutorials for {}", base),
            SearchKind::Documentation => format!("documentation for {}", base),
            SearchKind::Examples => format!("example projects using {}", base),
            SearchKind::Custom => base,
        }
    }
}

/// Typed error for resource search calls.
#[derive(Debug)]
pub enum SearchError {
    /// Missing API key or search engine id
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Failed to parse response JSON
    Parse(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Auth(msg) => write!(f, "Auth error: {}", msg),
            SearchError::Network(msg) => write!(f, "Network error: {}", msg),
            SearchError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            SearchError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_query_varies_by_kind() {
        assert_eq!(SearchKind::Tutorials.seed_query("demo", "Rust"), "tutorials for demo Rust");
        assert_eq!(SearchKind::Documentation.seed_query("demo", "Rust"), "documentation for demo Rust");
        assert_eq!(SearchKind::Examples.seed_query("demo", "Rust"), "example projects using demo Rust");
        assert_eq!(SearchKind::Custom.seed_query("demo", "Rust"), "demo Rust");
    }

    #[test]
    fn seed_query_omits_empty_language() {
        assert_eq!(SearchKind::Custom.seed_query("demo", ""), "demo");
    }

    #[test]
    fn kind_cycle_wraps() {
        let mut kind = SearchKind::Tutorials;
        for _ in 0..SearchKind::ORDER.len() {
            kind = kind.next();
        }
        assert_eq!(kind, SearchKind::Tutorials);
    }

    #[test]
    fn response_without_items_deserializes() {
        let resp: GoogleSearchResponse = serde_json::from_str(r#"{"kind":"customsearch#search"}"#).unwrap();
        assert!(resp.items.is_none());
    }
}
