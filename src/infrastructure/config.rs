//! Configuration file management.
//!
//! Handles loading the optional TOML configuration file.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError, Result};

/// Load configuration from the default location, or defaults if absent.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config() -> Result<AppConfig> {
    let config_path = AppConfig::default_config_path();

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    validate(&config)?;

    tracing::debug!(path = %path.display(), org = %config.github.org, "Configuration loaded");

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.github.org.trim().is_empty() {
        return Err(AppError::Config {
            message: "github.org must not be empty".into(),
        });
    }

    if config.github.per_page == 0 || config.github.per_page > 100 {
        return Err(AppError::Config {
            message: format!(
                "github.per_page must be between 1 and 100, got {}",
                config.github.per_page
            ),
        });
    }

    if config.credentials.command.is_empty() {
        return Err(AppError::Config {
            message: "credentials.command must name a program".into(),
        });
    }

    Ok(())
}
