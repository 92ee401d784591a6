//! Application settings for kohya-tweaks
//!
//! Handles the ~/.kohya-tweaks/ directory and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Directory saved configs are written to, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "configs";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Returns the path to the home directory for settings (~/.kohya-tweaks)
pub fn app_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".kohya-tweaks"))
}

/// Paths used by kohya-tweaks
pub struct AppPaths {
    pub root: PathBuf,
    pub config: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(app_home()?))
    }

    /// Paths rooted somewhere other than the home directory
    pub fn at(root: PathBuf) -> Self {
        Self {
            config: root.join("config.toml"),
            root,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create settings directory")?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.config.exists()
    }
}

/// Load settings from disk, falling back to defaults when no file exists
pub fn load_settings(paths: &AppPaths) -> Result<Settings> {
    if !paths.config.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&paths.config).context("Failed to read config.toml")?;
    toml::from_str(&content).context("Failed to parse config.toml")
}

/// Save settings to disk
pub fn save_settings(paths: &AppPaths, settings: &Settings) -> Result<()> {
    paths.ensure_dirs()?;
    let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(&paths.config, content).context("Failed to write config.toml")?;
    Ok(())
}
