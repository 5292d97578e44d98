//! Configuration loading for the external mover.

use crate::Difficulty;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Default selector endpoint.
pub const DEFAULT_URL: &str = "http://localhost:8000/api/get-move";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for reaching the external move selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoverConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Thinking time forwarded to the selector, in milliseconds.
    #[serde(default = "default_move_time_ms")]
    pub move_time_ms: u64,
    /// HTTP timeout in milliseconds. No timeout when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Skip the selector and always play the random fallback.
    #[serde(default)]
    pub offline: bool,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_move_time_ms() -> u64 {
    2000
}

impl Default for MoverConfig {
    fn default() -> Self {
        MoverConfig {
            url: default_url(),
            difficulty: Difficulty::default(),
            move_time_ms: default_move_time_ms(),
            timeout_ms: None,
            offline: false,
        }
    }
}

impl MoverConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads a configuration file.
    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    /// Loads `mover.toml` from the current directory or its parents,
    /// falling back to defaults when none exists.
    pub async fn load() -> Result<Self, ConfigError> {
        let paths = ["mover.toml", "../mover.toml", "../../mover.toml"];

        for path in paths {
            if Path::new(path).exists() {
                let config = Self::load_from(path).await?;
                info!(path, "loaded mover config");
                return Ok(config);
            }
        }

        info!("no mover.toml found, using defaults");
        Ok(MoverConfig::default())
    }
}
