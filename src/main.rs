mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use korpo::config::KorpoConfig;
use korpo::Direction;

#[derive(Parser)]
#[command(name = "korpo", version, about = "Corporate speak ⇄ plain language translator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract example pairs from a directory of dialog transcripts
    Ingest {
        /// Directory holding the corpus files
        dir: PathBuf,
        /// Snapshot to write (defaults to the configured snapshot path)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Add to the existing snapshot instead of replacing it
        #[arg(long)]
        append: bool,
    },
    /// Show the examples nearest to a phrase
    Search {
        query: String,
        /// to_plain or to_corporate
        #[arg(long, default_value = "to_plain")]
        direction: Direction,
        /// Number of examples to return
        #[arg(short)]
        k: Option<usize>,
    },
    /// Translate a phrase using retrieved examples
    Translate {
        text: String,
        /// to_plain or to_corporate
        #[arg(long, default_value = "to_plain")]
        direction: Direction,
        /// Free-text description of the situation
        #[arg(long)]
        context: Option<String>,
    },
    /// Summarize the example snapshot
    Stats,
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to ~/.korpo/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = KorpoConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Ingest { dir, out, append } => cli::ingest::ingest(&config, &dir, out, append)?,
        Command::Search {
            query,
            direction,
            k,
        } => cli::search::search(&config, &query, direction, k).await?,
        Command::Translate {
            text,
            direction,
            context,
        } => cli::translate::translate(&config, &text, direction, context).await?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Model { action } => match action {
            ModelAction::Download => cli::model_download(&config.embedding).await?,
        },
    }

    Ok(())
}
