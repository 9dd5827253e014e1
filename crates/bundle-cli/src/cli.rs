//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect the aggregated configuration of a set of installed extensions.
#[derive(Parser)]
#[command(name = "bundlecfg", version, about)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, boot and print the aggregated configuration as JSON
    Dump {
        /// Directory containing one subdirectory per installed extension
        #[arg(long)]
        root: PathBuf,
        /// Restrict aggregation to these extensions (default: all)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },
    /// Print the configuration fingerprint of one extension
    Hash {
        /// Directory containing one subdirectory per installed extension
        #[arg(long)]
        root: PathBuf,
        /// Extension name in any accepted spelling
        name: String,
    },
    /// List the discovered configuration files of one extension
    Files {
        /// Directory containing one subdirectory per installed extension
        #[arg(long)]
        root: PathBuf,
        /// Extension name in any accepted spelling
        name: String,
    },
}
