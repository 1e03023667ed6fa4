//! Configuration loading and management
//!
//! Handles parsing of `.kb.toml` configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = ".kb.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote item store settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Board behavior settings
    #[serde(default)]
    pub board: BoardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            board: BoardConfig::default(),
        }
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the item store API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Column the board focuses on at startup
    #[serde(default = "default_column")]
    pub default_column: String,
}

fn default_column() -> String {
    "todo".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_column: default_column(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist. A present-but-malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|err| Error::InvalidConfig(format!("{}: {}", path.display(), err)))?;
        Ok(config)
    }

    /// Loads `.kb.toml` from the current directory if present.
    pub fn load_default() -> Result<Self> {
        Self::load(Path::new(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.board.default_column, "todo");
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[api]\nbase_url = \"http://boards.internal\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://boards.internal");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "api = not toml").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
    }
}
