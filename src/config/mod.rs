//! Configuration management for framekit
//!
//! This module provides configuration with support for:
//! - Environment variables
//! - YAML/TOML configuration files
//! - Configuration validation
//!
//! Nothing here is global: options types such as `TableOptions`,
//! `SortOptions` and `TaskGroup` are built from a [`FrameConfig`] with their
//! `from_config` constructors.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;
pub mod validation;

/// Main configuration structure for framekit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Table and `Display` rendering
    pub display: DisplayConfig,
    /// Sorting defaults
    pub sort: SortConfig,
    /// Task group sizing
    pub parallel: ParallelConfig,
    /// Log filtering
    pub logging: LoggingConfig,
}

/// Display configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text written for nil cells
    pub nil_text: String,
    /// Longer DataFrames show a head and tail of this many rows in total
    pub max_rows: usize,
    /// Uppercase header and footer cells
    pub uppercase_headers: bool,
}

/// Sort configuration section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Keep equal rows in their original order
    pub stable: bool,
}

/// Parallel configuration section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker threads per task group (0 = number of CPUs)
    pub max_workers: usize,
}

/// Logging configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            nil_text: crate::series::typed::DEFAULT_NIL_TEXT.to_string(),
            max_rows: 6,
            uppercase_headers: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level.parse().map_err(|_| {
            Error::ConfigurationError(format!("Invalid log level: {}", self.level))
        })
    }

    /// Set the `log` crate's maximum level. The library never installs a
    /// logger of its own.
    pub fn apply(&self) -> Result<()> {
        log::set_max_level(self.level_filter()?);
        Ok(())
    }
}

impl FrameConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Load configuration with precedence: defaults -> file -> env
    pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load_with_precedence(config_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrameConfig::default();
        assert_eq!(config.display.nil_text, "NaN");
        assert_eq!(config.display.max_rows, 6);
        assert!(config.display.uppercase_headers);
        assert!(!config.sort.stable);
        assert_eq!(config.parallel.max_workers, 0);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut config = FrameConfig::default();
        config.display.nil_text = "-".to_string();
        config.sort.stable = true;

        let yaml = config.to_yaml().unwrap();
        assert_eq!(FrameConfig::from_yaml(&yaml).unwrap(), config);

        let toml = config.to_toml().unwrap();
        assert_eq!(FrameConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_logging_level() {
        let logging = LoggingConfig {
            level: "DEBUG".to_string(),
        };
        assert_eq!(logging.level_filter().unwrap(), log::LevelFilter::Debug);

        let bad = LoggingConfig {
            level: "loud".to_string(),
        };
        assert!(matches!(bad.apply(), Err(Error::ConfigurationError(_))));
    }
}
