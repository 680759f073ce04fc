//! CLI - Command Line Interface for radiobrowse
//!
//! Every action is scriptable. Output is `name,url` text on a terminal and
//! JSON when piped or with `--json`.
//!
//! # Examples
//!
//! ```bash
//! # Search the directory and save the results as a playlist
//! radiobrowse search "jazz" --save jazz.m3u
//!
//! # Resolve a playlist URL to its stream
//! radiobrowse resolve http://example.com/listen.pls
//!
//! # Play a favorite
//! radiobrowse play --favorite "Radio Paradise"
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::playlist::ExportFormat;
use crate::stream::PlayerType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Directory unreachable or malformed response
    NetworkError = 3,
    /// Search returned no stations
    NothingFound = 4,
    /// Playlist could not be resolved to a stream
    ResolveFailed = 5,
    /// Player could not be started
    PlayerFailed = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// radiobrowse - search, save and play internet radio stations
#[derive(Parser, Debug)]
#[command(
    name = "radiobrowse",
    version,
    about = "Search the community radio directory and play stations",
    long_about = "Searches the radio-browser directory, saves results as text \
                  or M3U playlists, resolves .pls/.m3u station links to their \
                  streams and plays them in mpv or VLC.",
    after_help = "EXAMPLES:\n\
                  radiobrowse search jazz                 List matching stations\n\
                  radiobrowse search --genre folk         Search a preset genre\n\
                  radiobrowse export rock -o rock.m3u     Save results as playlist\n\
                  radiobrowse play --favorite KEXP        Play a favorite"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug logging to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Path to favorites file (overrides config)
    #[arg(long, short = 'f', global = true)]
    pub favorites: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search stations by name
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List preset genres
    #[command(visible_alias = "g")]
    Genres(GenresCmd),

    /// Search and write the results to a file
    #[command(visible_alias = "e")]
    Export(ExportCmd),

    /// Resolve a station URL to its stream URL
    #[command(visible_alias = "r")]
    Resolve(ResolveCmd),

    /// Resolve and play a station
    #[command(visible_alias = "p")]
    Play(PlayCmd),

    /// List favorites
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),
}

// =============================================================================
// Search Command
// =============================================================================

/// Non-exact station name search
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search term
    #[arg(required_unless_present = "genre", conflicts_with = "genre")]
    pub query: Option<String>,

    /// Search a preset genre instead (see `genres`)
    #[arg(long, short = 'g')]
    pub genre: Option<String>,

    /// Maximum number of results (0 = all)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: usize,

    /// Also save the results (.m3u => playlist, anything else => text)
    #[arg(long, short = 's')]
    pub save: Option<PathBuf>,

    /// Play the result at this index once the search finishes
    #[arg(long)]
    pub play: Option<usize>,
}

impl SearchCmd {
    /// The term actually sent to the directory
    pub fn term(&self) -> Result<String, String> {
        match (&self.query, &self.genre) {
            (_, Some(genre)) => crate::models::find_genre(genre)
                .map(String::from)
                .ok_or_else(|| format!("Unknown genre '{}'. See `radiobrowse genres`.", genre)),
            (Some(query), None) => Ok(query.clone()),
            (None, None) => Err("A search term or --genre is required".to_string()),
        }
    }
}

/// List preset genres
#[derive(Args, Debug)]
pub struct GenresCmd {}

// =============================================================================
// Export Command
// =============================================================================

/// Search and save the results
#[derive(Args, Debug)]
pub struct ExportCmd {
    /// Search term
    #[arg(required = true)]
    pub query: String,

    /// Output file
    #[arg(long, short = 'o', required = true)]
    pub output: PathBuf,

    /// File format (default: from the output extension)
    #[arg(long, value_enum)]
    pub format: Option<FormatChoice>,
}

impl ExportCmd {
    /// Explicit format, else guessed from the output path
    pub fn effective_format(&self) -> ExportFormat {
        match self.format {
            Some(FormatChoice::Txt) => ExportFormat::Text,
            Some(FormatChoice::M3u) => ExportFormat::M3u,
            None => ExportFormat::from_path(&self.output),
        }
    }
}

/// Export file format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    /// `name,url` per line
    Txt,
    /// Extended M3U playlist
    M3u,
}

// =============================================================================
// Resolve Command
// =============================================================================

/// Resolve a `.pls` / `.m3u` link to the stream it points at
#[derive(Args, Debug)]
pub struct ResolveCmd {
    /// Station URL
    #[arg(required = true)]
    pub url: String,
}

// =============================================================================
// Play Command
// =============================================================================

/// Resolve and play a station
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// A `name,url` line or a bare station URL
    #[arg(required_unless_present_any = ["favorite", "playlist"])]
    pub entry: Option<String>,

    /// Play a favorite by label
    #[arg(long, short = 'F', conflicts_with_all = ["entry", "playlist"])]
    pub favorite: Option<String>,

    /// Play an entry from a saved export (.m3u or text)
    #[arg(long, conflicts_with = "entry")]
    pub playlist: Option<PathBuf>,

    /// Entry index within --playlist
    #[arg(long, short = 'i', default_value = "0")]
    pub index: usize,

    /// Player to use (default: from config, else mpv)
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,

    /// Stay attached until the player exits
    #[arg(long, short = 'w')]
    pub wait: bool,
}

/// Local player selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChoice {
    /// mpv media player
    Mpv,
    /// VLC media player
    Vlc,
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Mpv => PlayerType::Mpv,
            PlayerChoice::Vlc => PlayerType::Vlc,
        }
    }
}

// =============================================================================
// Favorites Command
// =============================================================================

/// List favorites in file order
#[derive(Args, Debug)]
pub struct FavoritesCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print `data` as JSON, or `text` for humans
    pub fn print<T: Serialize>(&self, data: T, text: impl std::fmt::Display) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            let text = text.to_string();
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
