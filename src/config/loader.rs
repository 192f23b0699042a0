//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::ConfigurationError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

/// Overlay the `FRAMEKIT_*` environment variables onto `config`
pub fn apply_env(config: &mut FrameConfig) -> Result<()> {
    // Display configuration
    if let Ok(nil_text) = env::var("FRAMEKIT_NIL_TEXT") {
        config.display.nil_text = nil_text;
    }
    if let Some(max_rows) = env_parse("FRAMEKIT_MAX_DISPLAY_ROWS")? {
        config.display.max_rows = max_rows;
    }
    if let Some(uppercase) = env_parse("FRAMEKIT_UPPERCASE_HEADERS")? {
        config.display.uppercase_headers = uppercase;
    }

    // Sort configuration
    if let Some(stable) = env_parse("FRAMEKIT_STABLE_SORT")? {
        config.sort.stable = stable;
    }

    // Parallel configuration
    if let Some(workers) = env_parse("FRAMEKIT_MAX_WORKERS")? {
        config.parallel.max_workers = workers;
    }

    // Logging configuration
    if let Ok(level) = env::var("FRAMEKIT_LOG_LEVEL") {
        config.logging.level = level;
    }

    Ok(())
}

/// Load configuration from environment variables on top of the defaults
pub fn load_from_env() -> Result<FrameConfig> {
    let mut config = FrameConfig::default();
    apply_env(&mut config)?;
    Ok(config)
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<FrameConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<FrameConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<FrameConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<FrameConfig> {
    // Missing sections and fields keep their defaults
    let mut config = match config_file {
        Some(path) => {
            debug!("loading configuration from {}", path.as_ref().display());
            load_from_file(path.as_ref())?
        }
        None => FrameConfig::default(),
    };

    // Environment has the highest precedence
    apply_env(&mut config)?;

    config.validate()?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &FrameConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
        None => config.to_yaml()?, // Default to YAML
    };

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Get configuration file paths in order of precedence
pub fn get_config_file_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![
        "framekit.yml".into(),
        "framekit.yaml".into(),
        "framekit.toml".into(),
    ];

    // User config directory
    if let Some(config_dir) = dirs::config_dir() {
        let framekit_dir = config_dir.join("framekit");
        paths.push(framekit_dir.join("config.yml"));
        paths.push(framekit_dir.join("config.yaml"));
        paths.push(framekit_dir.join("config.toml"));
    }

    // Environment variable override
    if let Ok(config_path) = env::var("FRAMEKIT_CONFIG_FILE") {
        paths.insert(0, config_path.into());
    }

    paths
}

/// Auto-discover and load configuration file
pub fn auto_load() -> Result<FrameConfig> {
    match get_config_file_paths().into_iter().find(|path| path.exists()) {
        Some(path) => load_with_precedence(Some(path)),
        // No config file found, load from environment and defaults
        None => load_with_precedence::<&Path>(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Mutex to serialize tests that modify environment variables
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "FRAMEKIT_NIL_TEXT",
        "FRAMEKIT_MAX_DISPLAY_ROWS",
        "FRAMEKIT_UPPERCASE_HEADERS",
        "FRAMEKIT_STABLE_SORT",
        "FRAMEKIT_MAX_WORKERS",
        "FRAMEKIT_LOG_LEVEL",
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<(&str, Option<String>)> = VARS.iter().map(|v| (*v, env::var(v).ok())).collect();
        for v in VARS {
            env::remove_var(v);
        }
        for (k, v) in vars {
            env::set_var(k, v);
        }

        f();

        for (k, v) in saved {
            match v {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }

    #[test]
    fn test_load_from_env() {
        with_env(
            &[
                ("FRAMEKIT_NIL_TEXT", "null"),
                ("FRAMEKIT_MAX_DISPLAY_ROWS", "10"),
                ("FRAMEKIT_STABLE_SORT", "true"),
                ("FRAMEKIT_LOG_LEVEL", "debug"),
            ],
            || {
                let config = load_from_env().unwrap();
                assert_eq!(config.display.nil_text, "null");
                assert_eq!(config.display.max_rows, 10);
                assert!(config.sort.stable);
                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.parallel.max_workers, 0);
            },
        );
    }

    #[test]
    fn test_invalid_env_value() {
        with_env(&[("FRAMEKIT_MAX_WORKERS", "many")], || {
            assert!(matches!(load_from_env(), Err(Error::ConfigurationError(_))));
        });
    }

    #[test]
    fn test_load_from_yaml_partial() {
        let yaml = r#"
display:
  nil_text: "-"
sort:
  stable: true
"#;
        let config = load_from_yaml(yaml).unwrap();
        assert_eq!(config.display.nil_text, "-");
        assert_eq!(config.display.max_rows, 6);
        assert!(config.sort.stable);
    }

    #[test]
    fn test_load_from_toml() {
        let toml = r#"
[parallel]
max_workers = 4

[logging]
level = "warn"
"#;
        let config = load_from_toml(toml).unwrap();
        assert_eq!(config.parallel.max_workers, 4);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("framekit.toml");
        let mut file_config = FrameConfig::default();
        file_config.display.max_rows = 8;
        file_config.parallel.max_workers = 2;
        save_to_file(&file_config, &path).unwrap();

        with_env(&[("FRAMEKIT_MAX_WORKERS", "3")], || {
            let config = load_with_precedence(Some(&path)).unwrap();
            assert_eq!(config.display.max_rows, 8);
            assert_eq!(config.parallel.max_workers, 3);
        });
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("framekit.ini");
        assert!(save_to_file(&FrameConfig::default(), &path).is_err());
        fs::write(&path, "").unwrap();
        assert!(load_from_file(&path).is_err());
    }

    #[test]
    fn test_config_file_paths() {
        let paths = get_config_file_paths();
        assert!(paths.iter().any(|p| p.ends_with("framekit.toml")));
    }
}
