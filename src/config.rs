//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_MENU_PREFIX, MENU_PAGE_CAPACITY};
use crate::models::is_valid_name;
use crate::services::GenerationOptions;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "TOGGLEGEN_CONFIG_DIR";

/// Default destination folders.
///
/// Used when neither the command line nor the toggle sheet names a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Folder for generated clips
    #[serde(default)]
    pub clip_folder: Option<PathBuf>,
    /// Folder for generated menu pages
    #[serde(default)]
    pub menu_folder: Option<PathBuf>,
}

/// Generation tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Menu page name prefix (pages are `<prefix>_<index>`)
    #[serde(default = "default_menu_prefix")]
    pub menu_prefix: String,
    /// Controls per menu page
    #[serde(default = "default_page_capacity")]
    pub page_capacity: usize,
}

fn default_menu_prefix() -> String {
    DEFAULT_MENU_PREFIX.to_string()
}

const fn default_page_capacity() -> usize {
    MENU_PAGE_CAPACITY
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            menu_prefix: default_menu_prefix(),
            page_capacity: default_page_capacity(),
        }
    }
}

/// Application configuration.
///
/// Stored at `<config_dir>/Togglegen/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default destination folders
    #[serde(default)]
    pub paths: PathConfig,
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// `TOGGLEGEN_CONFIG_DIR` wins when set. Otherwise:
    /// - Linux: `~/.config/Togglegen/`
    /// - macOS: `~/Library/Application Support/Togglegen/`
    /// - Windows: `%APPDATA%\Togglegen\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `page_capacity` is at least 1
    /// - `menu_prefix` is not blank and contains no path separators
    pub fn validate(&self) -> Result<()> {
        if self.generation.page_capacity == 0 {
            anyhow::bail!("Menu page capacity must be at least 1");
        }

        if self.generation.menu_prefix.trim().is_empty() {
            anyhow::bail!("Menu prefix must not be empty");
        }

        if !is_valid_name(&self.generation.menu_prefix) {
            anyhow::bail!(
                "Menu prefix '{}' must not contain path separators",
                self.generation.menu_prefix
            );
        }

        Ok(())
    }

    /// Options for a generation run.
    #[must_use]
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            menu_prefix: self.generation.menu_prefix.clone(),
            page_capacity: self.generation.page_capacity,
        }
    }
}
