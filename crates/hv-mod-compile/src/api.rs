use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};

use hv_base::config::{JDOODLE_CLIENT_ID_VAR, JDOODLE_CLIENT_SECRET_VAR, env_secret, env_value};

use crate::types::{CompileError, ExecuteOutcome, ExecuteRequest, ExecuteResponse};

const JDOODLE_ENDPOINT: &str = "https://api.jdoodle.com/v1/execute";
const TIMEOUT_SECS: u64 = 30;

pub struct CompileClient {
    client: Client,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
}

impl CompileClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            client_id: env_value(JDOODLE_CLIENT_ID_VAR),
            client_secret: env_secret(JDOODLE_CLIENT_SECRET_VAR),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Run a script remotely and relay the execution result.
    pub fn execute(&self, script: &str, language: &str, version_index: &str) -> Result<ExecuteOutcome, CompileError> {
        let client_id =
            self.client_id.as_ref().ok_or_else(|| CompileError::Auth("JDOODLE_CLIENT_ID not set".to_string()))?;
        let client_secret = self
            .client_secret
            .as_ref()
            .ok_or_else(|| CompileError::Auth("JDOODLE_CLIENT_SECRET not set".to_string()))?;

        let request = ExecuteRequest {
            client_id: client_id.clone(),
            client_secret: client_secret.expose_secret().to_string(),
            script: script.to_string(),
            language: language.to_string(),
            version_index: version_index.to_string(),
        };

        let response = self.client.post(JDOODLE_ENDPOINT).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompileError::Api { status: status.as_u16(), body });
        }

        let parsed: ExecuteResponse = response.json().map_err(|e| CompileError::Parse(e.to_string()))?;
        Ok(ExecuteOutcome {
            output: parsed.output.unwrap_or_default(),
            status_code: parsed.status_code.unwrap_or(0),
            memory: parsed.memory,
            cpu_time: parsed.cpu_time,
        })
    }
}

impl Default for CompileClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a file path to JDoodle's (language, versionIndex) pair by extension.
/// Unknown extensions fall back to python3, the source language of most of
/// the repositories this tool gets pointed at.
pub fn language_for_path(path: &str) -> (&'static str, &'static str) {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "py" => ("python3", "4"),
        "js" => ("nodejs", "4"),
        "rs" => ("rust", "4"),
        "c" => ("c", "5"),
        "cc" | "cpp" | "cxx" => ("cpp", "5"),
        "java" => ("java", "4"),
        "go" => ("go", "4"),
        "rb" => ("ruby", "4"),
        "php" => ("php", "4"),
        "sh" => ("bash", "4"),
        _ => ("python3", "4"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_for_path_maps_known_extensions() {
        assert_eq!(language_for_path("src/main.py"), ("python3", "4"));
        assert_eq!(language_for_path("lib.rs"), ("rust", "4"));
        assert_eq!(language_for_path("a/b/app.CPP"), ("cpp", "5"));
    }

    #[test]
    fn language_for_path_defaults_unknown() {
        assert_eq!(language_for_path("README"), ("python3", "4"));
        assert_eq!(language_for_path("notes.weird"), ("python3", "4"));
    }
}
