//! CSV file loading
//!
//! Reads one CSV file into a `Dataset`. The first record is the header;
//! records with fewer fields than the header are padded with Null by the
//! table layer, longer records are truncated.

use std::path::Path;

use thiserror::Error;

use super::table::Dataset;

/// Errors while reading a CSV file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: csv::Error,
    },

    #[error("{path} has no header row")]
    MissingHeader { path: String },
}

/// Reads the CSV file at `path` into a dataset named `name`.
pub fn load_csv(path: &Path, name: &str) -> Result<Dataset, LoadError> {
    let display = path.display().to_string();

    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: display.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Parse {
            path: display.clone(),
            source,
        })?
        .clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader { path: display });
    }

    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Parse {
            path: display.clone(),
            source,
        })?;
        records.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(Dataset::from_records(name, columns, records))
}
