mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use babel::config::BabelConfig;

#[derive(Parser)]
#[command(name = "babel", version, about = "A procedural Library of Babel")]
struct Cli {
    /// Config file (defaults to ~/.babel/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve,
    /// Print the book at a coordinate
    Book {
        hexagon: String,
        wall: String,
        shelf: String,
        volume: String,
        /// Print the full book as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the library for a concept
    Search {
        query: String,
        /// comprehensive, precise, exploratory or enhanced
        #[arg(long)]
        mode: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        max: Option<usize>,
    },
    /// Show the vocabulary tables in use
    Concepts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BabelConfig::load_from(path)?,
        None => BabelConfig::load()?,
    };

    // Log to stderr so stdout stays clean for `book --json`.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            babel::server::serve(config).await?;
        }
        Command::Book {
            hexagon,
            wall,
            shelf,
            volume,
            json,
        } => {
            let parts = [hexagon.as_str(), wall.as_str(), shelf.as_str(), volume.as_str()];
            cli::book::show(&config, parts, json).await?;
        }
        Command::Search { query, mode, max } => {
            cli::search::search(&config, &query, mode.as_deref(), max).await?;
        }
        Command::Concepts => {
            cli::concepts::show(&config)?;
        }
    }

    Ok(())
}
