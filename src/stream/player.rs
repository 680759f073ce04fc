//! Local Player - mpv/VLC playback support
//!
//! Resolved streams are handed to an external media player process.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerType {
    /// mpv media player (default)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle - check for it
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Mpv => "mpv",
        }
    }

    /// Get a display name for this player
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Vlc => "VLC",
            PlayerType::Mpv => "mpv",
        }
    }

    /// Parse a player name from config (`mpv` / `vlc`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mpv" => Some(PlayerType::Mpv),
            "vlc" => Some(PlayerType::Vlc),
            _ => None,
        }
    }

    /// Command-line arguments for playing `stream_url` titled `title`
    pub fn args(&self, stream_url: &str, title: &str) -> Vec<String> {
        match self {
            PlayerType::Vlc => vec![
                stream_url.to_string(),
                format!("--meta-title={}", title),
                "--no-video-title-show".to_string(),
            ],
            PlayerType::Mpv => vec![
                stream_url.to_string(),
                format!("--force-media-title={}", title),
                "--no-video".to_string(),
            ],
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Player exited with code {0}")]
    Exited(i32),
}

/// Anything that can play a resolved stream URL
#[allow(async_fn_in_trait)]
pub trait PlaybackSink {
    async fn play(&self, stream_url: &str, title: &str) -> Result<(), PlayerError>;
}

/// Local player process
pub struct LocalPlayer {
    player_type: PlayerType,
    wait: bool,
}

impl LocalPlayer {
    /// Create a detached local player of the specified type
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            wait: false,
        }
    }

    /// Keep the player attached and return only once it exits
    pub fn waiting(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Get the player type
    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Check if the player is available on the system
    pub async fn is_available(&self) -> bool {
        let cmd = self.player_type.command();

        // If it's a full path (macOS app bundle), check if it exists
        if cmd.starts_with('/') {
            return std::path::Path::new(cmd).exists();
        }

        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl PlaybackSink for LocalPlayer {
    async fn play(&self, stream_url: &str, title: &str) -> Result<(), PlayerError> {
        let mut cmd = Command::new(self.player_type.command());
        cmd.args(self.player_type.args(stream_url, title));

        if self.wait {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        debug!(player = %self.player_type, stream_url, "spawning player");
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.player_type.command().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })?;
        info!(player = %self.player_type, title, "playing");

        if !self.wait {
            return Ok(());
        }

        let status = child.wait().await?;
        match status.code() {
            // 130: interrupted with Ctrl+C, i.e. stopped by the user
            Some(0) | Some(130) | None => Ok(()),
            Some(code) => Err(PlayerError::Exited(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_type_command() {
        // On macOS with VLC installed, returns full path; otherwise "vlc"
        let vlc_cmd = PlayerType::Vlc.command();
        assert!(vlc_cmd == "vlc" || vlc_cmd == "/Applications/VLC.app/Contents/MacOS/VLC");
        assert_eq!(PlayerType::Mpv.command(), "mpv");
    }

    #[test]
    fn test_player_type_display() {
        assert_eq!(PlayerType::Vlc.to_string(), "VLC");
        assert_eq!(PlayerType::Mpv.to_string(), "mpv");
    }

    #[test]
    fn test_default_player() {
        assert_eq!(PlayerType::default(), PlayerType::Mpv);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(PlayerType::from_name("MPV"), Some(PlayerType::Mpv));
        assert_eq!(PlayerType::from_name(" vlc "), Some(PlayerType::Vlc));
        assert_eq!(PlayerType::from_name("winamp"), None);
    }

    #[test]
    fn test_player_args_carry_title() {
        let args = PlayerType::Mpv.args("http://s/live", "Radio X");
        assert_eq!(args[0], "http://s/live");
        assert!(args.contains(&"--force-media-title=Radio X".to_string()));

        let args = PlayerType::Vlc.args("http://s/live", "Radio X");
        assert!(args.contains(&"--meta-title=Radio X".to_string()));
    }
}
