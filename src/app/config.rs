//! Configuration for the compositor

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::terminal_size::TerminalSize;
use crate::clients::DEFAULT_STATUS_BAR_HEIGHT;
use crate::core::{BorderGlyphs, Result as CoreResult, Screen, DEFAULT_CLIENT_BACKGROUND};

/// Compositor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Screen settings
    pub screen: ScreenConfig,
    /// Background used when the runner creates clients
    pub client_background: char,
    /// Whether the runner attaches a status bar
    pub status_bar: bool,
    /// Status bar height in rows
    pub status_bar_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            client_background: DEFAULT_CLIENT_BACKGROUND,
            status_bar: true,
            status_bar_height: DEFAULT_STATUS_BAR_HEIGHT,
        }
    }
}

/// Screen configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width used when the environment doesn't give one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    /// Height used when the environment doesn't give one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Fill character for uncovered cells
    pub background: char,
    /// Border glyphs
    pub border: BorderGlyphs,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            columns: None,
            rows: None,
            background: ' ',
            border: BorderGlyphs::default(),
        }
    }
}

impl ScreenConfig {
    /// Configured fallback size, if both dimensions are set
    pub fn fallback_size(&self) -> Option<TerminalSize> {
        Some(TerminalSize {
            cols: self.columns?,
            rows: self.rows?,
        })
    }

    /// Build a cleared screen with these settings
    pub fn build(&self, width: usize, height: usize) -> CoreResult<Screen> {
        let mut screen = Screen::with_border(width, height, self.border)?;
        screen.set_background(self.background);
        screen.clear();
        Ok(screen)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/charscreen/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        "ignoring config at {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }
        Self::default()
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("charscreen"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
