//! Server configuration
//!
//! All tunables are explicit values threaded into the subsystems that need
//! them; nothing reads process-wide state. Configuration comes from a JSON
//! file (`./csvserve.json` by default), with every field optional and CLI
//! flags applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::EngineConfig;

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory holding the `*.csv` datasets
    pub data_dir: PathBuf,
    /// Listen address for the HTTP server
    pub bind_addr: String,
    /// Page size when a request omits `limit`
    pub default_page_size: usize,
    /// Hard ceiling for `limit`
    pub max_page_size: usize,
    /// Row sample cap for schema inference
    pub schema_sample_cap: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind_addr: "127.0.0.1:8000".to_string(),
            default_page_size: 50,
            max_page_size: 1000,
            schema_sample_cap: 10_000,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The engine slice of this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
            schema_sample_cap: self.schema_sample_cap,
        }
    }
}
