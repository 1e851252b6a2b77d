//! Configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub toast: ToastConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links: LinksConfig::default(),
            toast: ToastConfig::default(),
        }
    }
}

/// Links file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Path to the links file (default: ~/.config/clipdeck/links.toml)
    #[serde(default = "default_links_file")]
    pub file: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            file: default_links_file(),
        }
    }
}

fn default_links_file() -> String {
    Config::default_config_dir()
        .join("links.toml")
        .to_string_lossy()
        .to_string()
}

/// Toast behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    /// How long the confirmation stays visible, in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

fn default_duration_ms() -> u64 {
    2000
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Config {
    /// Load configuration from default location.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            Self::from_file(&config_path.to_string_lossy())
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &str) -> Result<Self> {
        let expanded = expand_path(path);
        let content = std::fs::read_to_string(&expanded)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Get the default config directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("clipdeck")
    }

    /// Get the links file path with ~ expanded.
    pub fn links_file(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.links.file))
    }
}

/// Expand ~ to home directory.
fn expand_path(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]).to_string_lossy().to_string();
        }
    }
    path.to_string()
}
