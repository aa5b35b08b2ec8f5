//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::CatalogError;
use crate::query::QueryError;

pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced at the command line; all exit non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
