use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pipeline::{ControllerConfig, ThrottlePolicy, Width};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// State store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Run every reducer twice and fail loudly when the results differ.
    #[serde(default)]
    pub debug_mode: bool,
}

/// Reconciliation pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Exact builder width. Omitted means follow the viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Rate limit for rebuilds (default: debounce, 100 ms).
    #[serde(default = "default_throttle")]
    pub throttle: ThrottleConfig,
    /// Rate limit for the invalidate hook (default: none).
    #[serde(default)]
    pub invalidate_throttle: ThrottleConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: None,
            throttle: default_throttle(),
            invalidate_throttle: ThrottleConfig::None,
        }
    }
}

/// Throttle policy as written in the config file:
/// `{ policy = "debounce", window_ms = 100 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ThrottleConfig {
    #[default]
    None,
    Debounce { window_ms: u64 },
    FirstInWindow { window_ms: u64 },
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Log file path prefix. Omitted means stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: None,
        }
    }
}

fn default_throttle() -> ThrottleConfig {
    ThrottleConfig::Debounce { window_ms: 100 }
}

fn default_filter() -> String {
    "info".to_string()
}

impl From<ThrottleConfig> for ThrottlePolicy {
    fn from(config: ThrottleConfig) -> Self {
        match config {
            ThrottleConfig::None => ThrottlePolicy::None,
            ThrottleConfig::Debounce { window_ms } => {
                ThrottlePolicy::Debounce(Duration::from_millis(window_ms))
            }
            ThrottleConfig::FirstInWindow { window_ms } => {
                ThrottlePolicy::FirstInWindow(Duration::from_millis(window_ms))
            }
        }
    }
}

impl From<&PipelineConfig> for ControllerConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            throttle: config.throttle.into(),
            invalidate_throttle: config.invalidate_throttle.into(),
            width: config.width.map_or(Width::Automatic, Width::Exactly),
        }
    }
}
