use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::{Config, ThrottleConfig};

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

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/listforge/config.toml` on Unix/macOS, or the
    /// equivalent from `dirs::config_dir()` elsewhere. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("listforge").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Windowed throttle policies have a non-zero window
    /// - An exact width is a positive, finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_throttle("pipeline.throttle", self.pipeline.throttle)?;
        validate_throttle("pipeline.invalidate_throttle", self.pipeline.invalidate_throttle)?;

        if let Some(width) = self.pipeline.width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("pipeline.width must be a positive number, got {}", width),
                });
            }
        }

        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn validate_throttle(field: &str, throttle: ThrottleConfig) -> Result<(), ConfigError> {
    match throttle {
        ThrottleConfig::Debounce { window_ms: 0 }
        | ThrottleConfig::FirstInWindow { window_ms: 0 } => {
            Err(ConfigError::ValidationError {
                message: format!("{} window_ms must be greater than zero", field),
            })
        }
        _ => Ok(()),
    }
}
