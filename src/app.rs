//! Application session
//!
//! Owns the directory client, the stream resolver, the session's favorites
//! and the current result list. Front ends drive it with plain strings and
//! get plain values back.

use thiserror::Error;

use crate::api::{RadioBrowserClient, SearchError};
use crate::config::Config;
use crate::favorites::Favorites;
use crate::models::{ResultList, StationEntry};
use crate::playlist::ExportFormat;
use crate::stream::{self, PlayError, PlaybackSink, ResolutionError, StreamResolver};

/// Errors from session actions
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No favorite named '{0}'")]
    UnknownFavorite(String),
    #[error("No result at index {index} ({len} results)")]
    NoSuchResult { index: usize, len: usize },
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Resolve(#[from] ResolutionError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// One browsing session
pub struct App {
    directory: RadioBrowserClient,
    resolver: StreamResolver,
    favorites: Favorites,
    results: ResultList,
}

impl App {
    pub fn new(directory: RadioBrowserClient, resolver: StreamResolver, favorites: Favorites) -> Self {
        Self {
            directory,
            resolver,
            favorites,
            results: Vec::new(),
        }
    }

    /// Build a session from config and already-loaded favorites
    pub fn from_config(config: &Config, favorites: Favorites) -> Self {
        Self::new(
            RadioBrowserClient::with_timeout(config.directory_url(), config.timeout()),
            StreamResolver::with_timeout(config.timeout()),
            favorites,
        )
    }

    /// Run a search, replacing the previous results.
    ///
    /// The old results are gone even when the search fails.
    pub async fn search(&mut self, term: &str) -> Result<&[StationEntry], AppError> {
        self.results.clear();
        self.results = self.directory.search(term).await?;
        Ok(&self.results)
    }

    /// Current results in directory order
    pub fn results(&self) -> &[StationEntry] {
        &self.results
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Render the current results; `None` when there is nothing to save
    pub fn export(&self, format: ExportFormat) -> Option<String> {
        if self.results.is_empty() {
            None
        } else {
            Some(format.render(&self.results))
        }
    }

    /// Resolve a station URL to its stream
    pub async fn resolve(&self, url: &str) -> Result<String, AppError> {
        Ok(self.resolver.resolve(url).await?)
    }

    /// Resolve and play any station entry
    pub async fn play<S: PlaybackSink>(
        &self,
        station: &StationEntry,
        sink: &S,
    ) -> Result<String, AppError> {
        Ok(stream::play_station(&self.resolver, sink, station).await?)
    }

    /// Resolve and play a result by index
    pub async fn play_result<S: PlaybackSink>(
        &self,
        index: usize,
        sink: &S,
    ) -> Result<String, AppError> {
        let station = self.results.get(index).ok_or(AppError::NoSuchResult {
            index,
            len: self.results.len(),
        })?;
        self.play(station, sink).await
    }

    /// Resolve and play a favorite by label
    pub async fn play_favorite<S: PlaybackSink>(
        &self,
        label: &str,
        sink: &S,
    ) -> Result<String, AppError> {
        let favorite = self
            .favorites
            .get(label)
            .ok_or_else(|| AppError::UnknownFavorite(label.to_string()))?;
        let station = StationEntry {
            name: favorite.label.clone(),
            url: favorite.url.clone(),
        };
        self.play(&station, sink).await
    }
}
