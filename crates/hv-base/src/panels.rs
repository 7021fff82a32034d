//! Shared helpers for panel content: change detection and width fitting.

use sha2::{Digest, Sha256};
use unicode_width::UnicodeWidthChar;

/// Hash content for change detection (SHA-256, collision-resistant)
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:064x}", hasher.finalize())
}

/// Tracks the hash of the last content a panel rendered, so expensive
/// regeneration (e.g. syntax highlighting) only runs when the content changes.
#[derive(Debug, Default)]
pub struct PanelCache {
    content_hash: Option<String>,
}

impl PanelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` and report whether it differs from the last call.
    pub fn update_if_changed(&mut self, content: &str) -> bool {
        let new_hash = hash_content(content);
        if self.content_hash.as_deref() == Some(&new_hash) {
            return false;
        }
        self.content_hash = Some(new_hash);
        true
    }

    /// Forget the recorded hash so the next update always reports a change.
    pub fn invalidate(&mut self) {
        self.content_hash = None;
    }
}

/// Truncate a string to at most `max` display columns, appending an ellipsis
/// when anything was cut. Wide characters count per their terminal width.
pub fn fit_width(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }
    let limit = max.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > limit {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_if_changed_first_call_returns_true() {
        let mut cache = PanelCache::new();
        assert!(cache.update_if_changed("hello"));
    }

    #[test]
    fn update_if_changed_same_content_returns_false() {
        let mut cache = PanelCache::new();
        cache.update_if_changed("hello");
        assert!(!cache.update_if_changed("hello"));
    }

    #[test]
    fn update_if_changed_different_content_returns_true() {
        let mut cache = PanelCache::new();
        cache.update_if_changed("hello");
        assert!(cache.update_if_changed("world"));
    }

    #[test]
    fn invalidate_forces_change() {
        let mut cache = PanelCache::new();
        cache.update_if_changed("hello");
        cache.invalidate();
        assert!(cache.update_if_changed("hello"));
    }

    #[test]
    fn fit_width_short_string_unchanged() {
        assert_eq!(fit_width("abc", 10), "abc");
    }

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        let out = fit_width("abcdefgh", 5);
        assert!(out.ends_with('…'), "expected ellipsis, got {:?}", out);
        assert!(out.chars().count() <= 5);
    }

    #[test]
    fn fit_width_zero_is_empty() {
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn hash_content_is_stable() {
        assert_eq!(hash_content("x"), hash_content("x"));
        assert_ne!(hash_content("x"), hash_content("y"));
    }
}
