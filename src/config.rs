use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::device::SerialSinkConfig;
use crate::display::DEFAULT_WINDOW_TITLE;

/// Application configuration
///
/// Detection thresholds are compile-time constants and not part of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: u32,

    // Display
    pub window_title: String,
    pub frame_delay_ms: u64,

    // Counter device
    pub serial_port: Option<String>,
    pub baud_rate: u32,
    pub serial_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            frame_delay_ms: 10,
            serial_port: None,
            baud_rate: 9600,
            serial_settle_ms: 2000,
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            serde_json::from_str(&content)
                .context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .context("Failed to write config file")
    }

    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to get home directory")?;
        Ok(home.join(".emotioncounter"))
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.json"))
    }

    /// Serial settings, if a counter device is configured
    pub fn serial_sink_config(&self) -> Option<SerialSinkConfig> {
        let port = self.serial_port.as_deref()?.trim();
        if port.is_empty() {
            return None;
        }
        Some(SerialSinkConfig {
            port: port.to_string(),
            baud_rate: self.baud_rate,
            settle_ms: self.serial_settle_ms,
        })
    }
}
