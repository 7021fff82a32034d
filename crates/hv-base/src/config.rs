//! Environment-backed configuration and the UI palette.
//!
//! Every API credential is read from the environment (a `.env` file is
//! honored via dotenvy). Clients load their own key at construction time;
//! a missing key is only an error for the actions that need it.

use std::env;

use secrecy::SecretString;

/// GitHub personal access token. Optional — without it the contents API
/// still works, at anonymous rate limits.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Groq API key, required for assistant queries.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
/// Overrides the default Groq model.
pub const GROQ_MODEL_VAR: &str = "GROQ_MODEL";
/// Google Custom Search credentials, required for resource search.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const GOOGLE_CSE_ID_VAR: &str = "GOOGLE_CSE_ID";
/// JDoodle credentials, required for remote code execution.
pub const JDOODLE_CLIENT_ID_VAR: &str = "JDOODLE_CLIENT_ID";
pub const JDOODLE_CLIENT_SECRET_VAR: &str = "JDOODLE_CLIENT_SECRET";

/// Read a secret from the environment, treating empty values as unset.
pub fn env_secret(var: &str) -> Option<SecretString> {
    dotenvy::dotenv().ok();
    env::var(var).ok().filter(|v| !v.is_empty()).map(SecretString::from)
}

/// Read a plain (non-secret) value from the environment.
pub fn env_value(var: &str) -> Option<String> {
    dotenvy::dotenv().ok();
    env::var(var).ok().filter(|v| !v.is_empty())
}

// =============================================================================
// THEME COLORS
// =============================================================================

pub mod theme {
    use ratatui::style::Color;

    pub fn accent() -> Color {
        Color::Rgb(138, 180, 248)
    }
    pub fn accent_dim() -> Color {
        Color::Rgb(95, 125, 175)
    }
    pub fn success() -> Color {
        Color::Rgb(80, 250, 123)
    }
    pub fn warning() -> Color {
        Color::Rgb(241, 250, 140)
    }
    pub fn error() -> Color {
        Color::Rgb(255, 85, 85)
    }
    pub fn text() -> Color {
        Color::Rgb(220, 220, 230)
    }
    pub fn text_muted() -> Color {
        Color::Rgb(130, 130, 150)
    }
    pub fn bg_surface() -> Color {
        Color::Rgb(30, 32, 44)
    }
    pub fn border() -> Color {
        Color::Rgb(70, 74, 95)
    }
    pub fn user() -> Color {
        Color::Rgb(139, 233, 253)
    }
    pub fn assistant() -> Color {
        Color::Rgb(189, 147, 249)
    }
}

// =============================================================================
// UI CHARACTERS
// =============================================================================

pub mod chars {
    pub const HORIZONTAL: &str = "─";
    pub const DIR_OPEN: &str = "▼";
    pub const DIR_CLOSED: &str = "▶";
    pub const DOT: &str = "●";
    pub const CROSS: &str = "✗";
}
