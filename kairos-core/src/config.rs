//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/kairos/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/kairos/` (~/.config/kairos/)
//! - State/Logs: `$XDG_STATE_HOME/kairos/` (~/.local/state/kairos/)
//!
//! The `[display]` section seeds the process-wide [`ConfigHandle`] that
//! filters and live labels read fresh on every render, so runtime changes
//! apply to already-mounted labels without re-creation.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::Deserialize;

use crate::error::{Error, Result};

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

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Display defaults for filters and live labels
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Process-wide display defaults.
///
/// `without_suffix` drops the "ago"/"in" qualifier from relative phrases
/// unless a label overrides it. `timezone` is an IANA name applied by the
/// filters; empty means none.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default)]
    pub without_suffix: bool,

    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            without_suffix: false,
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    String::new()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
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

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/kairos/config.toml` (~/.config/kairos/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("kairos").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/kairos/` (~/.local/state/kairos/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("kairos")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/kairos/kairos.log` (~/.local/state/kairos/kairos.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("kairos.log")
    }
}

/// Shared, externally-mutable view of the display defaults.
///
/// Cheap to clone; every clone sees the same record.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<DisplayConfig>>,
}

impl ConfigHandle {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(display)),
        }
    }

    /// The current defaults, copied out.
    pub fn snapshot(&self) -> DisplayConfig {
        self.inner.read().unwrap().clone()
    }

    pub fn set_without_suffix(&self, without_suffix: bool) {
        self.inner.write().unwrap().without_suffix = without_suffix;
    }

    pub fn set_timezone(&self, timezone: &str) {
        self.inner.write().unwrap().timezone = timezone.to_string();
    }
}
