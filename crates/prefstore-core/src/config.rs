//! Configuration management for Prefstore.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{PrefError, Result};
use crate::file::Format;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Prefstore.
///
/// ## Example Configuration File (prefstore.toml)
///
/// ```toml
/// [general]
/// root_directory = "/srv/qc/users"
/// log_level = "info"
///
/// [output]
/// pretty = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// How settings files are written
    pub output: OutputConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding one subdirectory per user (None = default location)
    pub root_directory: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            root_directory: None,
            log_level: "info".to_string(),
        }
    }
}

/// Settings file output options
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Write indented JSON instead of a single line
    pub pretty: bool,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| PrefError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| PrefError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "prefstore").ok_or_else(|| PrefError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("prefstore.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "prefstore").ok_or_else(|| PrefError::ConfigError {
            reason: "Could not determine data directory".to_string(),
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the user root directory (from config or `<data dir>/users`).
    pub fn root_dir(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.general.root_directory {
            Ok(path.clone())
        } else {
            Ok(Self::default_data_dir()?.join("users"))
        }
    }

    /// Write format for settings files
    pub fn format(&self) -> Format {
        if self.output.pretty {
            Format::Pretty
        } else {
            Format::Compact
        }
    }
}
