//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the session in `app`.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::path::Path;

use crate::app::{App, AppError};
use crate::cli::{
    ExitCode, ExportCmd, FavoritesCmd, GenresCmd, Output, PlayCmd, ResolveCmd, SearchCmd,
};
use crate::config::Config;
use crate::models::{StationEntry, GENRES};
use crate::playlist::{self, ExportFormat};
use crate::stream::{LocalPlayer, PlayError, PlayerType};

/// Map a session error to the exit code scripts see
fn exit_code_for(err: &AppError) -> ExitCode {
    match err {
        AppError::UnknownFavorite(_) | AppError::NoSuchResult { .. } => ExitCode::InvalidArgs,
        AppError::Search(_) => ExitCode::NetworkError,
        AppError::Resolve(_) | AppError::Play(PlayError::Resolve(_)) => ExitCode::ResolveFailed,
        AppError::Play(PlayError::Player(_)) => ExitCode::PlayerFailed,
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, app: &mut App, config: &Config, output: &Output) -> ExitCode {
    let term = match cmd.term() {
        Ok(term) => term,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };

    output.info(format!("Searching for: {}", term));

    let count = match app.search(&term).await {
        Ok(results) => results.len(),
        Err(e) => return output.error(format!("Search failed: {}", e), exit_code_for(&e)),
    };
    if count == 0 {
        return output.error("Nothing found", ExitCode::NothingFound);
    }
    output.info(format!("Found {} '{}' stations", count, term));

    if let Some(ref path) = cmd.save {
        if let Err(code) = save_results(app, path, ExportFormat::from_path(path), output) {
            return code;
        }
    }

    let shown = if cmd.limit == 0 {
        app.results()
    } else {
        &app.results()[..cmd.limit.min(count)]
    };
    if let Err(e) = output.print(shown, playlist::to_text(shown)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }

    match cmd.play {
        Some(index) => {
            let player = LocalPlayer::new(config.player());
            if !player.is_available().await {
                return player_missing(player.player_type(), output);
            }
            match app.play_result(index, &player).await {
                Ok(stream_url) => {
                    output.info(format!("Playing {} ({})", app.results()[index].name, stream_url));
                    ExitCode::Success
                }
                Err(e) => output.error(format!("Playback failed: {}", e), exit_code_for(&e)),
            }
        }
        None => ExitCode::Success,
    }
}

/// Write the session's results to `path`
fn save_results(app: &App, path: &Path, format: ExportFormat, output: &Output) -> Result<(), ExitCode> {
    let Some(contents) = app.export(format) else {
        return Err(output.error("Nothing to save", ExitCode::NothingFound));
    };
    playlist::save(path, &contents).map_err(|e| output.error(e.to_string(), ExitCode::Error))?;
    output.info(format!("Saved {}", path.display()));
    Ok(())
}

// =============================================================================
// Genres Command
// =============================================================================

pub fn genres_cmd(_cmd: GenresCmd, output: &Output) -> ExitCode {
    if let Err(e) = output.print(GENRES, GENRES.join("\n")) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Export Command
// =============================================================================

#[derive(Serialize)]
struct ExportResponse {
    path: String,
    format: &'static str,
    count: usize,
}

pub async fn export_cmd(cmd: ExportCmd, app: &mut App, output: &Output) -> ExitCode {
    output.info(format!("Searching for: {}", cmd.query));

    let count = match app.search(&cmd.query).await {
        Ok(results) => results.len(),
        Err(e) => return output.error(format!("Search failed: {}", e), exit_code_for(&e)),
    };

    let format = cmd.effective_format();
    if let Err(code) = save_results(app, &cmd.output, format, output) {
        return code;
    }

    let response = ExportResponse {
        path: cmd.output.display().to_string(),
        format: match format {
            ExportFormat::Text => "txt",
            ExportFormat::M3u => "m3u",
        },
        count,
    };
    let text = format!("{} stations -> {}", count, response.path);
    if let Err(e) = output.print(&response, text) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Resolve Command
// =============================================================================

#[derive(Serialize)]
struct ResolveResponse<'a> {
    url: &'a str,
    stream_url: String,
}

pub async fn resolve_cmd(cmd: ResolveCmd, app: &App, output: &Output) -> ExitCode {
    match app.resolve(&cmd.url).await {
        Ok(stream_url) => {
            let text = stream_url.clone();
            let response = ResolveResponse {
                url: &cmd.url,
                stream_url,
            };
            if let Err(e) = output.print(&response, text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Cannot resolve stream: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Play Command
// =============================================================================

#[derive(Serialize)]
struct PlayResponse {
    status: &'static str,
    player: &'static str,
    station: String,
    stream_url: String,
}

/// Load a saved export and pick one entry
fn station_from_file(path: &Path, index: usize) -> Result<StationEntry, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let mut entries = match ExportFormat::from_path(path) {
        ExportFormat::M3u => playlist::parse_m3u(&text),
        ExportFormat::Text => text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(StationEntry::from_line)
            .collect(),
    };
    if index >= entries.len() {
        return Err(format!(
            "Entry index {} out of range ({} entries in {})",
            index,
            entries.len(),
            path.display()
        ));
    }
    Ok(entries.swap_remove(index))
}

fn player_missing(player_type: PlayerType, output: &Output) -> ExitCode {
    output.error(
        format!("{} not found. Install it first.", player_type.display_name()),
        ExitCode::PlayerFailed,
    )
}

pub async fn play_cmd(cmd: PlayCmd, app: &App, config: &Config, output: &Output) -> ExitCode {
    let player_type = cmd.player.map(PlayerType::from).unwrap_or_else(|| config.player());
    let player = LocalPlayer::new(player_type).waiting(cmd.wait);
    if !player.is_available().await {
        return player_missing(player_type, output);
    }

    let (station, result) = if let Some(ref label) = cmd.favorite {
        (label.clone(), app.play_favorite(label, &player).await)
    } else {
        let station = match (&cmd.playlist, &cmd.entry) {
            (Some(path), _) => match station_from_file(path, cmd.index) {
                Ok(station) => station,
                Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
            },
            (None, Some(line)) => StationEntry::from_line(line),
            (None, None) => {
                return output.error("Nothing to play", ExitCode::InvalidArgs);
            }
        };
        output.info(format!("Playing {}", station.name));
        (station.name.clone(), app.play(&station, &player).await)
    };

    match result {
        Ok(stream_url) => {
            let text = if cmd.wait {
                String::new()
            } else {
                format!("playing {}", station)
            };
            let response = PlayResponse {
                status: if cmd.wait { "stopped" } else { "playing" },
                player: player_type.display_name(),
                station,
                stream_url,
            };
            if let Err(e) = output.print(&response, text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Playback cannot start: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Favorites Command
// =============================================================================

pub fn favorites_cmd(_cmd: FavoritesCmd, app: &App, output: &Output) -> ExitCode {
    let favorites = app.favorites();
    let text = if favorites.is_empty() {
        "No Favorites".to_string()
    } else {
        favorites
            .entries()
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    };
    if let Err(e) = output.print(favorites.entries(), text) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
