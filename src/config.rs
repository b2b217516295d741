//! Endpoint configuration for the app-server token exchange.
//!
//! The login and register URLs point at the app server that issues chat
//! access tokens. Configuration can be loaded from a JSON file, with
//! environment variables taking precedence for deployments that inject
//! endpoints at runtime.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the token endpoint
const ENV_LOGIN_URL: &str = "CHATSESSION_LOGIN_URL";

/// Environment variable overriding the registration endpoint
const ENV_REGISTER_URL: &str = "CHATSESSION_REGISTER_URL";

/// HTTP request timeout in seconds.
/// 30s allows for slow app-server responses while failing fast enough
/// that a stuck login attempt does not hold the session indefinitely.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Token endpoint: POST with credentials, returns an access token.
    pub login_url: String,
    /// Registration endpoint: POST with credentials, creates an account.
    pub register_url: String,
    /// Timeout applied to every app-server request.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Config {
    pub fn new(login_url: impl Into<String>, register_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            register_url: register_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Load configuration from a JSON file, then apply env overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_LOGIN_URL) {
            self.login_url = url;
        }
        if let Ok(url) = std::env::var(ENV_REGISTER_URL) {
            self.register_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults_when_missing() {
        let json = r#"{"login_url":"https://a/login","register_url":"https://a/register"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "chatsession-config-{}.json",
            std::process::id()
        ));
        let mut config = Config::new("https://a/login", "https://a/register");
        config.request_timeout_secs = 5;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.login_url, "https://a/login");
        assert_eq!(loaded.register_url, "https://a/register");
        assert_eq!(loaded.request_timeout_secs, 5);

        let _ = std::fs::remove_file(path);
    }
}
