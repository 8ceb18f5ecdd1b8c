//! Pebble CLI - headless level tooling

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pebble")]
#[command(about = "Headless tools for Pebble levels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and assemble a level, reporting its contents
    Validate {
        /// Path to the level JSON file
        level: String,
    },

    /// Run a level headlessly for a number of fixed steps
    Run {
        /// Path to the level JSON file
        level: String,

        /// Number of 60Hz fixed steps to simulate
        #[arg(long, default_value_t = 600)]
        frames: u32,

        /// Optional game config JSON
        #[arg(long)]
        config: Option<String>,
    },

    /// Load a level, optionally simulate, and re-derive it to a new file
    Export {
        /// Path to the level JSON file
        level: String,

        /// Output path for the re-derived level
        output: String,

        /// Fixed steps to simulate before exporting
        #[arg(long, default_value_t = 0)]
        frames: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { level } => commands::validate::run(&level),
        Commands::Run {
            level,
            frames,
            config,
        } => commands::run::run(&level, frames, config.as_deref()),
        Commands::Export {
            level,
            output,
            frames,
        } => commands::export::run(&level, &output, frames),
    }
}
