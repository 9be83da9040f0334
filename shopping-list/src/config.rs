use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keybindings::Keybindings;

pub const DEFAULT_PLACEHOLDER: &str = "Add an item...";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// User configuration, all fields optional in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
    /// Text shown in the empty input
    pub placeholder: String,
    /// Overrides merged onto [`Keybindings::defaults`]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            keybindings: Keybindings::defaults(),
        }
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/shopping-list/config.toml` on Linux, or the
    /// platform equivalent via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("shopping-list").join("config.toml")
    }

    /// Loads configuration.
    ///
    /// - An explicit `path` must exist.
    /// - Without one, the default path is tried and a missing file yields
    ///   `Config::default()`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Ok(Config::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Parses and validates the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses TOML, merging keybindings onto the defaults.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.keybindings = Keybindings::merge(Keybindings::defaults(), config.keybindings);
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks that every bound key string parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = self.keybindings.invalid_keys();
        if !invalid.is_empty() {
            return Err(ConfigError::ValidationError {
                message: format!("unrecognised keys: {}", invalid.join(", ")),
            });
        }
        Ok(())
    }
}
