//! Configuration loading for serper-mcp
//!
//! Configuration is loaded from:
//! 1. `.env` in the working directory (if present)
//! 2. Environment variables SERPER_API_KEY, GEMINI_API_KEY, SERPER_BASE_URL
//! 3. Environment variable SERPER_CONFIG_PATH
//! 4. ~/.binks/serper.toml
//! 5. Default values
//!
//! Environment variables always win over values from the TOML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Serper API configuration
    #[serde(default)]
    pub serper: SerperConfig,
    /// Gemini credentials (loaded for downstream consumers, not used by the tools)
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Serper API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SerperConfig {
    /// API key forwarded verbatim in the `X-API-KEY` header
    #[serde(default)]
    pub api_key: String,
    /// Base URL; the endpoint name is appended as a path segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout applied to every upstream request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Timeout used by `quick_fact`
    #[serde(default = "default_quick_fact_timeout")]
    pub quick_fact_timeout_seconds: u64,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_quick_fact_timeout() -> u64 {
    8
}

impl Default for SerperConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            quick_fact_timeout_seconds: default_quick_fact_timeout(),
        }
    }
}

impl SerperConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn quick_fact_timeout(&self) -> Duration {
        Duration::from_secs(self.quick_fact_timeout_seconds)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Keys must never reach the logs, so Debug is written by hand.
impl std::fmt::Debug for SerperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperConfig")
            .field("api_key", &redact(Some(&self.api_key)))
            .field("base_url", &self.base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("quick_fact_timeout_seconds", &self.quick_fact_timeout_seconds)
            .finish()
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(self.api_key.as_deref()))
            .finish()
    }
}

/// A missing `.env` is normal; anything else is worth reporting
fn dotenv_problem(err: dotenvy::Error) -> Option<dotenvy::Error> {
    if err.not_found() {
        None
    } else {
        Some(err)
    }
}

fn redact(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "<set>",
        _ => "<unset>",
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded environment from: {}", path.display()),
            Err(e) => {
                if let Some(e) = dotenv_problem(e) {
                    tracing::warn!("Ignoring unreadable .env file: {}", e);
                }
            }
        }

        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Override file values with environment variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("SERPER_API_KEY") {
            self.serper.api_key = key;
        }
        if let Some(url) = lookup("SERPER_BASE_URL") {
            self.serper.base_url = url;
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SERPER_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".binks").join("serper.toml"));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.serper.base_url, "https://google.serper.dev/search");
        assert_eq!(config.serper.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.serper.quick_fact_timeout(), Duration::from_secs(8));
        assert!(!config.serper.has_api_key());
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [serper]
            api_key = "file-key"
            request_timeout_seconds = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.serper.api_key, "file-key");
        assert_eq!(config.serper.request_timeout_seconds, 12);
        assert_eq!(config.serper.quick_fact_timeout_seconds, 8);
        assert_eq!(config.serper.base_url, default_base_url());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: Config = toml::from_str(
            r#"
            [serper]
            api_key = "file-key"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("SERPER_API_KEY", "env-key"),
            ("GEMINI_API_KEY", "gemini-key"),
            ("SERPER_BASE_URL", "http://localhost:9999"),
        ]
        .into_iter()
        .collect();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.serper.api_key, "env-key");
        assert_eq!(config.serper.base_url, "http://localhost:9999");
        assert_eq!(config.gemini.api_key.as_deref(), Some("gemini-key"));
    }

    #[test]
    fn test_missing_dotenv_is_not_reported() {
        let missing = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no .env",
        ));
        assert!(dotenv_problem(missing).is_none());
    }

    #[test]
    fn test_malformed_dotenv_is_reported() {
        let malformed = dotenvy::Error::LineParse("SERPER_API_KEY='unterminated".to_string(), 15);
        assert!(matches!(
            dotenv_problem(malformed),
            Some(dotenvy::Error::LineParse(_, 15))
        ));

        let unreadable = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(dotenv_problem(unreadable).is_some());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let mut config = Config::default();
        config.serper.api_key = "secret-value".to_string();
        config.gemini.api_key = Some("other-secret".to_string());

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-value"));
        assert!(!rendered.contains("other-secret"));
        assert!(rendered.contains("<set>"));
    }
}
