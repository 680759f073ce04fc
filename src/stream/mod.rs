//! Stream handling
//!
//! - Resolver: `.pls` / `.m3u` indirection to a direct stream URL
//! - Player: mpv/VLC playback of resolved streams

pub mod player;
pub mod resolver;

pub use player::{LocalPlayer, PlaybackSink, PlayerError, PlayerType};
pub use resolver::{PlaylistKind, ResolutionError, StreamResolver};

use thiserror::Error;

use crate::models::StationEntry;

/// Failure to start playback of a station
#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Resolve(#[from] ResolutionError),
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Resolve a station's URL and hand the stream to `sink`.
///
/// Returns the stream URL that was played.
pub async fn play_station<S: PlaybackSink>(
    resolver: &StreamResolver,
    sink: &S,
    station: &StationEntry,
) -> Result<String, PlayError> {
    let stream_url = resolver.resolve(&station.url).await?;
    sink.play(&stream_url, &station.name).await?;
    Ok(stream_url)
}
