//! radiobrowse - internet radio directory browser and player
//!
//! Searches the community radio-browser directory, exports results as text
//! or M3U playlists, resolves `.pls` / `.m3u` station links to their streams
//! and hands them to a local player.
//!
//! # Modules
//!
//! - `models` - Station, favorite and genre types
//! - `api` - radio-browser directory client
//! - `stream` - Playlist resolution and local playback
//! - `playlist` - Text and M3U export
//! - `favorites` - Favorites file loading
//! - `app` - Session state tying the above together
//! - `cli` / `commands` - Command line front end

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod models;
pub mod playlist;
pub mod stream;

// Re-export commonly used types
pub use models::{FavoriteEntry, ResultList, StationEntry};

pub use api::{RadioBrowserClient, SearchError};
pub use app::{App, AppError};
pub use favorites::{ConfigLoadError, Favorites};
pub use stream::{ResolutionError, StreamResolver};
