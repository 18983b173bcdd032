mod cli;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use stride::config::StrideConfig;
use stride::extract::types::Route;

#[derive(Parser)]
#[command(name = "stride", version, about = "Accomplishment extraction and content rotation")]
struct Cli {
    /// Config file (default: ~/.stride/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full extraction pipeline on a message
    Extract {
        /// Message text, or `-` to read stdin
        text: String,
        /// Recent routes, newest first
        #[arg(long = "history")]
        history: Vec<Route>,
    },
    /// Split a message into candidate items
    Segment {
        text: String,
        /// Also report which rule fired
        #[arg(long)]
        explain: bool,
    },
    /// Classify a single item
    Classify { text: String },
    /// Score the conversation route of a message
    Intent {
        text: String,
        /// Recent routes, newest first
        #[arg(long = "history")]
        history: Vec<Route>,
        /// Print every route's score and matched keywords
        #[arg(long)]
        explain: bool,
    },
    /// Pick the next item from a JSON content pool
    Select {
        /// JSON array of `{"id", "lastUsedAt"}` objects
        #[arg(long)]
        pool: PathBuf,
        /// Reference time, RFC 3339 (default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Ids to skip
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Candidate set size (default: rotation.candidate_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Include the ranking and pool summary
        #[arg(long)]
        explain: bool,
    },
    /// Simulate repeated select-and-mark rounds on a pool
    Rotate {
        #[arg(long)]
        pool: PathBuf,
        /// Number of rounds
        #[arg(long)]
        draws: usize,
        /// Days between rounds
        #[arg(long, default_value_t = 1)]
        interval_days: i64,
        /// Start time, RFC 3339 (default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective keyword tables as TOML
    Tables,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StrideConfig::load_from(path)?,
        None => StrideConfig::load()?,
    };

    // Log to stderr so stdout stays clean JSON.
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Extract { text, history } => cli::extract::extract(&config, &text, &history)?,
        Command::Segment { text, explain } => cli::extract::segment(&text, explain)?,
        Command::Classify { text } => cli::extract::classify(&config, &text)?,
        Command::Intent {
            text,
            history,
            explain,
        } => cli::extract::intent(&config, &text, &history, explain)?,
        Command::Select {
            pool,
            now,
            exclude,
            limit,
            explain,
        } => cli::rotation::select(&config, &pool, now, exclude, limit, explain)?,
        Command::Rotate {
            pool,
            draws,
            interval_days,
            now,
            seed,
        } => cli::rotation::rotate(&config, &pool, draws, interval_days, now, seed)?,
        Command::Tables => cli::tables::tables(&config)?,
    }

    Ok(())
}
