//! CLI module for csvserve
//!
//! Subcommands:
//! - serve: boot the HTTP server over a data directory
//! - query: one-shot query of a dataset, printed as JSON
//! - schema: one-shot schema print for a dataset

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run_command;
pub use errors::{CliError, CliResult};

/// Parses arguments and dispatches to the chosen command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
