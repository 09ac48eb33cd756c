mod commands;
mod dates;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evtrack_core::config::TrackerConfig;
use evtrack_core::storage::JsonFileStorage;
use evtrack_core::{EventId, EventStore, Filter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evtrack")]
#[command(about = "Track personal events on a calendar")]
struct Cli {
    /// Read and write events in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key (file name without .json) to use instead of the configured one
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, grouped by day
    List {
        /// Which events to show: all, past or upcoming
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Add an event to a day
    New {
        title: Option<String>,

        /// Day of the event (e.g. "2025-03-20", "tomorrow", "next friday")
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Change an event's title or location
    Edit {
        id: EventId,

        #[arg(short, long)]
        title: Option<String>,

        /// New location (pass "" to clear it)
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Delete an event
    Delete {
        id: EventId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show config and storage paths
    Config {
        /// Write the effective settings, including --data-dir and --key, to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(cli.data_dir, cli.key)?;

    match cli.command {
        Commands::List { filter } => commands::list::run(&open_store(&config), filter),
        Commands::New {
            title,
            date,
            location,
        } => commands::new::run(&mut open_store(&config), title, date, location),
        Commands::Edit {
            id,
            title,
            location,
        } => commands::edit::run(&mut open_store(&config), id, title, location),
        Commands::Delete { id, force } => {
            commands::delete::run(&mut open_store(&config), id, force)
        }
        Commands::Config { save } => commands::config::run(&config, save),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(data_dir: Option<PathBuf>, key: Option<String>) -> Result<TrackerConfig> {
    let mut config = TrackerConfig::load()?;

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(key) = key {
        if key.trim().is_empty() {
            anyhow::bail!("--key must not be empty");
        }
        config.storage_key = key;
    }

    Ok(config)
}

fn open_store(config: &TrackerConfig) -> EventStore<JsonFileStorage> {
    EventStore::open(config.storage())
}
