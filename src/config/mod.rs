//! Configuration management for bsontree
//!
//! Configuration is plain data: it can be built in code, or parsed from
//! TOML text or a TOML file. Every field has a default, so a partial file
//! only overrides what it names.
//!
//! ```toml
//! [decoder]
//! max_depth = 64
//! sizing = "single_pass"
//!
//! [logging]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Decoder configuration
    #[serde(default)]
    pub decoder: DecoderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Decoder behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Deepest container nesting accepted, counting the top-level document as 1
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// How container storage is sized
    #[serde(default)]
    pub sizing: SizingStrategy,

    /// Integer value reserved by the consumer as "missing".
    ///
    /// An int32 payload equal to this value decodes as a double so it cannot
    /// be mistaken for the sentinel. `None` disables the promotion; TOML has
    /// no null, so that setting is only reachable from code.
    #[serde(default = "default_missing_integer")]
    pub missing_integer: Option<i32>,
}

/// Container sizing strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SizingStrategy {
    /// Count each container's elements first, then convert into exact storage
    #[default]
    TwoPass,

    /// Convert in one pass into growable storage
    SinglePass,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_max_depth() -> usize {
    100
}

fn default_missing_integer() -> Option<i32> {
    Some(i32::MIN)
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            sizing: SizingStrategy::default(),
            missing_integer: default_missing_integer(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Arguments
    /// * `text` - TOML document
    ///
    /// # Returns
    /// * `Result<Config>` - Parsed and validated configuration
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render the configuration as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        self.decoder.validate()
    }
}

impl DecoderConfig {
    /// Validate decoder settings
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "decoder.max_depth".to_string(),
                value: self.max_depth.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
