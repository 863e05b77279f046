mod commands;
mod config;
mod render;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{AddArgs, DeleteArgs, EditArgs, ListArgs};
use config::{Config, Overrides, Settings};
use locations_editor::{Editor, Runtime};
use locations_sync::SyncClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Locations CLI - maintain a collection of geolocated sites
#[derive(Parser, Debug)]
#[command(name = "locations")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the collection service
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Config file (defaults to ./locations.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all locations
    List(ListArgs),

    /// Add a location
    Add(AddArgs),

    /// Change an existing location
    Edit(EditArgs),

    /// Delete a location
    Delete(DeleteArgs),

    /// Interactive editor
    Console,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(&std::env::current_dir()?)?,
    };
    let overrides = Overrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
    };
    let settings = Settings::resolve(&overrides, &config, |key| std::env::var(key).ok())?;

    tracing::debug!(
        api_url = settings.sync.base_url(),
        timeout = ?settings.sync.timeout,
        reconfirm_on_edit = settings.gate.reconfirm_on_edit,
        "Resolved settings"
    );

    let client = SyncClient::http(settings.sync)?;
    let mut runtime = Runtime::new(Editor::new(settings.gate), client);

    match cli.command {
        Command::List(args) => commands::list(&mut runtime, args).await,
        Command::Add(args) => commands::add(&mut runtime, args).await,
        Command::Edit(args) => commands::edit(&mut runtime, args).await,
        Command::Delete(args) => commands::delete(&mut runtime, args).await,
        Command::Console => commands::console(&mut runtime).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "locations",
            "add",
            "--name",
            "Clinic",
            "--lat",
            "-31.40",
            "--lng",
            "-64.19",
            "--api-url",
            "http://localhost:4000",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000"));
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.lat, -31.40);
                assert_eq!(args.lng, -64.19);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_edit_lat_requires_lng() {
        assert!(Cli::try_parse_from(["locations", "edit", "a", "--lat", "1.0"]).is_err());
    }
}
