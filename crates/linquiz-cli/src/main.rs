//! linquiz CLI: terminal front end for the equation quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod cues;

#[derive(Parser)]
#[command(name = "linquiz", version, about = "Timed linear-equation quiz")]
struct Cli {
    /// Show session progress logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session in the terminal
    Play {
        /// Participant name (prompted for when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Seed for reproducible question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Disable the terminal bell cues
        #[arg(long)]
        no_sound: bool,

        /// Result format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a question bank TOML file
    Validate {
        /// Path to the bank file
        #[arg(long)]
        bank: PathBuf,
    },

    /// List the questions in a bank
    Questions {
        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Only show one tier: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("linquiz={default_level},linquiz_core={default_level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Play {
            name,
            bank,
            seed,
            no_sound,
            format,
            config,
        } => commands::play::execute(name, bank, seed, no_sound, format, config).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Questions {
            bank,
            difficulty,
            config,
        } => commands::questions::execute(bank, difficulty, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
