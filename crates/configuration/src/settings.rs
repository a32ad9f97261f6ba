use core_types::{RollingWindow, StrategyCategory};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is valid.
/// The normalization bounds and the engine version are compile-time constants
/// of the analytics crate and deliberately have no entry here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub adapter: AdapterSettings,
    pub defaults: Defaults,
}

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
    /// Compact format
    Compact,
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set (e.g., "info", "debug").
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    /// File name prefix for the rolling log file.
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: "riskshape.log".to_string(),
        }
    }
}

/// Contains parameters for converting external trade objects into trade records.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// How many minor currency units make one major unit (100 for cents).
    pub minor_units_per_major: u32,
    /// Exact label -> category overrides, checked before the keyword rules.
    /// Keys are matched case-insensitively.
    pub strategy_aliases: HashMap<String, StrategyCategory>,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            minor_units_per_major: 100,
            strategy_aliases: HashMap::new(),
        }
    }
}

/// Defaults for CLI invocations that do not pass them explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub window: RollingWindow,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            window: RollingWindow::Days30,
        }
    }
}
