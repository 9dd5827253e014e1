//! Bundle configuration CLI
//!
//! Aggregates the configuration fragments of installed extensions and
//! exposes the result for tooling: JSON dumps, cache fingerprints and file
//! listings.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Dump { root, extensions } => commands::run_dump(&root, &extensions),
        Commands::Hash { root, name } => commands::run_hash(&root, &name),
        Commands::Files { root, name } => commands::run_files(&root, &name),
    }
}
