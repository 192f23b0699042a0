//! Configuration validation utilities
//!
//! This module checks that every setting of a [`FrameConfig`] is usable
//! before options types are built from it.

use super::*;
use crate::core::error::{Error, Result};

/// Validate the entire configuration
pub fn validate_config(config: &FrameConfig) -> Result<()> {
    validate_display_config(&config.display)?;
    validate_parallel_config(&config.parallel)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate display configuration
pub fn validate_display_config(config: &DisplayConfig) -> Result<()> {
    if config.nil_text.is_empty() {
        return Err(Error::ConfigurationError(
            "nil_text must not be empty".to_string(),
        ));
    }

    // The head and tail view needs room for at least two rows
    if config.max_rows < 2 {
        return Err(Error::ConfigurationError(format!(
            "max_rows must be at least 2, got {}",
            config.max_rows
        )));
    }

    Ok(())
}

/// Validate parallel configuration
pub fn validate_parallel_config(config: &ParallelConfig) -> Result<()> {
    if config.max_workers > 1024 {
        return Err(Error::ConfigurationError(format!(
            "max_workers is too large: {}",
            config.max_workers
        )));
    }

    Ok(())
}

/// Validate logging configuration
pub fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let valid_levels = ["off", "error", "warn", "info", "debug", "trace"];

    if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
        return Err(Error::ConfigurationError(format!(
            "Invalid log level '{}'. Valid levels: {}",
            config.level,
            valid_levels.join(", ")
        )));
    }

    Ok(())
}
