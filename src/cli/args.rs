//! CLI argument definitions using clap
//!
//! Commands:
//! - csvserve serve --config <path> [--data-dir <dir>] [--bind <addr>]
//! - csvserve query <dataset> [--filter ...] [--sort ...] [--limit N] [--offset N]
//! - csvserve schema <dataset>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvserve - a small, self-hostable query server for flat CSV files
#[derive(Parser, Debug)]
#[command(name = "csvserve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./csvserve.json")]
        config: PathBuf,

        /// Override the configured data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Override the configured listen address
        #[arg(long)]
        bind: Option<String>,
    },

    /// Execute a single query against a dataset and print the page as JSON
    Query {
        /// Dataset name (file stem under the data directory)
        dataset: String,

        /// Path to configuration file
        #[arg(long, default_value = "./csvserve.json")]
        config: PathBuf,

        /// Override the configured data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Filter expression, e.g. "status==active;amount>=100"
        #[arg(long)]
        filter: Option<String>,

        /// Sort expression, e.g. "amount:desc,name"
        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        offset: Option<usize>,
    },

    /// Print a dataset's inferred schema as JSON
    Schema {
        /// Dataset name (file stem under the data directory)
        dataset: String,

        /// Path to configuration file
        #[arg(long, default_value = "./csvserve.json")]
        config: PathBuf,

        /// Override the configured data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
