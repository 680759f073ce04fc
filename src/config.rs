//! Configuration management for radiobrowse
//!
//! Config is stored at ~/.config/radiobrowse/config.toml. Every field is
//! optional; a missing or unreadable file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::radio_browser::DEFAULT_BASE_URL;
use crate::stream::PlayerType;

const APP_DIR: &str = "radiobrowse";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory API base URL (another radio-browser mirror)
    pub directory_url: Option<String>,
    /// Favorites file location
    pub favorites_path: Option<PathBuf>,
    /// Preferred player (mpv, vlc)
    pub player: Option<String>,
    /// Network timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get config directory (~/.config/radiobrowse)
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR))
    }

    /// Get config file path (~/.config/radiobrowse/config.toml)
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|p| p.join("config.toml"))
    }

    /// Load config from the default location, or defaults if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from `path`, or defaults if missing or malformed
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed config");
            Self::default()
        })
    }

    /// Directory base URL, falling back to the default mirror
    pub fn directory_url(&self) -> &str {
        self.directory_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Favorites file: configured path, else favs.yaml next to config.toml
    pub fn favorites_path(&self) -> Option<PathBuf> {
        self.favorites_path
            .clone()
            .or_else(|| Self::dir().map(|p| p.join("favs.yaml")))
    }

    /// Preferred player, mpv when unset or unknown
    pub fn player(&self) -> PlayerType {
        self.player
            .as_deref()
            .and_then(PlayerType::from_name)
            .unwrap_or_default()
    }

    /// Network timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
