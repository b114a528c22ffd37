//! Configuration loading, validation, and management for Uniplan.
//!
//! Loads configuration from `~/.uniplan/config.toml` with environment
//! variable overrides. A missing config file is not an error — every
//! field has a sensible default and the service runs offline-only until
//! an API key is provided.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// The root configuration structure.
///
/// Maps directly to `~/.uniplan/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key. When absent the advisor always uses the offline
    /// fallback planner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name passed to the Gemini API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Directory holding the catalog JSON fixtures.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("data_dir", &self.data_dir)
            .field("gateway", &self.gateway)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            data_dir: default_data_dir(),
            gateway: GatewayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origins allowed by the CORS layer.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8420
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost".into(),
        "http://localhost:3000".into(),
        "http://localhost:4173".into(),
        "http://127.0.0.1".into(),
    ]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Errors raised while loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    Parse { path: String, reason: String },
}

impl AppConfig {
    /// The directory holding the config file (`~/.uniplan`).
    pub fn config_dir() -> PathBuf {
        std::env::var("UNIPLAN_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs_home()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".uniplan")
            })
    }

    /// Load configuration from the default path with env overrides.
    ///
    /// Environment variables (highest priority):
    /// - `GEMINI_API_KEY` / `UNIPLAN_API_KEY` — model API key
    /// - `UNIPLAN_MODEL` — model name
    /// - `UNIPLAN_DATA_DIR` — catalog fixture directory
    /// - `UNIPLAN_PORT` — gateway port
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// unparseable file is an error so typos are not silently ignored.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("UNIPLAN_API_KEY"))
        {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("UNIPLAN_MODEL") {
            self.model = model;
        }

        if let Ok(dir) = std::env::var("UNIPLAN_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(port) = std::env::var("UNIPLAN_PORT") {
            match port.parse() {
                Ok(p) => self.gateway.port = p,
                Err(_) => warn!(value = %port, "Ignoring non-numeric UNIPLAN_PORT"),
            }
        }
    }

    /// Whether a model backend can be configured at all.
    pub fn model_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
