//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/reflex/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/reflex/` (~/.config/reflex/)
//! - Data: `$XDG_DATA_HOME/reflex/` (~/.local/share/reflex/)
//! - State/Logs: `$XDG_STATE_HOME/reflex/` (~/.local/state/reflex/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Tracking behavior
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tracking and statistics configuration
#[derive(Debug, Deserialize)]
pub struct TrackingConfig {
    /// Cap on each recency list (triggers/locations/emotions)
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Default stats window preset ("week", "month", "all")
    #[serde(default = "default_window")]
    pub default_window: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            default_window: default_window(),
        }
    }
}

fn default_recent_limit() -> usize {
    20
}

fn default_window() -> String {
    "month".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if config.tracking.recent_limit == 0 {
            return Err(Error::Config(
                "tracking.recent_limit must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/reflex/config.toml` (~/.config/reflex/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("reflex").join("config.toml")
    }

    /// Returns the data directory path (for the document store)
    ///
    /// `$XDG_DATA_HOME/reflex/` (~/.local/share/reflex/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("reflex")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/reflex/` (~/.local/state/reflex/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("reflex")
    }

    /// Returns the document store file path
    ///
    /// `$XDG_DATA_HOME/reflex/reflex.db` (~/.local/share/reflex/reflex.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("reflex.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/reflex/reflex.log` (~/.local/state/reflex/reflex.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("reflex.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tracking.recent_limit, 20);
        assert_eq!(config.tracking.default_window, "month");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[tracking]
recent_limit = 10
default_window = "week"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.tracking.recent_limit, 10);
        assert_eq!(config.tracking.default_window, "week");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.tracking.recent_limit, 20);
    }
}
