//! Global configuration for dockhand
//!
//! Located at `~/.config/dockhand/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global dockhand configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub engine: EngineConfig,
    pub ui: UiConfig,
}

/// How to reach the container engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit endpoint tried before anything else (unix://, tcp://, http:// or a socket path)
    pub endpoint: Option<String>,
    /// Well-known local socket used when the default transport is unreachable
    pub socket: String,
    /// Client request timeout in seconds
    pub timeout_secs: u64,
    /// Grace period handed to the engine for stop and restart
    pub stop_timeout_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            socket: default_engine_socket(),
            timeout_secs: 120,
            stop_timeout_secs: 10,
        }
    }
}

#[cfg(windows)]
fn default_engine_socket() -> String {
    "//./pipe/docker_engine".to_string()
}

#[cfg(not(windows))]
fn default_engine_socket() -> String {
    "/var/run/docker.sock".to_string()
}

/// Dashboard behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Auto-refresh period in seconds
    pub refresh_interval_secs: u64,
    /// Input poll / redraw tick in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
            tick_rate_ms: 250,
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            "Loaded config from {:?}: refresh_interval_secs={}",
            path,
            config.ui.refresh_interval_secs
        );

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "dockhand").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "dockhand").ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Log file written while the dashboard owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("dockhand.log"))
    }

    /// Auto-refresh period, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.ui.refresh_interval_secs.max(1))
    }

    /// Input poll tick, never shorter than 10ms
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(10))
    }
}
