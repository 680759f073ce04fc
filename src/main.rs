//! radiobrowse - internet radio directory browser and player
//!
//! # Usage
//!
//! ```bash
//! radiobrowse search "blues"
//! radiobrowse search --genre "classic rock" --save classic.m3u
//! radiobrowse resolve http://example.com/listen.pls
//! radiobrowse play "Radio X,http://example.com/listen.pls"
//! radiobrowse favorites
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use radiobrowse::cli::{Cli, Command, ExitCode, Output};
use radiobrowse::commands;
use radiobrowse::config::Config;
use radiobrowse::{App, Favorites};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run_cli(cli).await.into()
}

/// Log to stderr so stdout stays parseable.
///
/// RUST_LOG wins; otherwise warnings only, or debug for this crate with -v.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,radiobrowse=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };

    // favorites are read once per process and passed down read-only
    let favorites = cli
        .favorites
        .clone()
        .or_else(|| config.favorites_path())
        .map(|path| Favorites::load_or_empty(&path))
        .unwrap_or_default();
    tracing::debug!(count = favorites.len(), "favorites loaded");

    let mut app = App::from_config(&config, favorites);

    match cli.command {
        Command::Search(cmd) => commands::search_cmd(cmd, &mut app, &config, &output).await,
        Command::Genres(cmd) => commands::genres_cmd(cmd, &output),
        Command::Export(cmd) => commands::export_cmd(cmd, &mut app, &output).await,
        Command::Resolve(cmd) => commands::resolve_cmd(cmd, &app, &output).await,
        Command::Play(cmd) => commands::play_cmd(cmd, &app, &config, &output).await,
        Command::Favorites(cmd) => commands::favorites_cmd(cmd, &app, &output),
    }
}
