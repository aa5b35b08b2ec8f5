//! Dataset catalog
//!
//! Owns the data directory: name→path resolution with a traversal guard,
//! `*.csv` listing, and an mtime-keyed cache so an unchanged file is parsed
//! once. Handlers receive `Arc<Dataset>` snapshots; a reload replaces the
//! cache entry with a fresh value instead of mutating rows in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;

use super::loader::{self, LoadError};
use super::table::Dataset;

/// Errors from dataset resolution and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Name is empty, contains a path separator, or escapes the data dir
    #[error("invalid dataset name: {0}")]
    InvalidName(String),

    #[error("dataset '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to read data directory: {0}")]
    DataDir(std::io::Error),
}

/// One entry in the dataset listing.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

struct CachedDataset {
    dataset: Arc<Dataset>,
    modified: SystemTime,
}

/// Resolves, loads, and caches datasets under one data directory.
pub struct DatasetCatalog {
    data_dir: PathBuf,
    cache: Mutex<HashMap<PathBuf, CachedDataset>>,
}

impl DatasetCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolves a dataset name to a path inside the data directory.
    ///
    /// `.csv` is appended when missing. Names with path separators or parent
    /// components are rejected before touching the filesystem, and the
    /// canonicalized path must stay under the data dir.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, CatalogError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        let file_name = if name.ends_with(".csv") {
            name.to_string()
        } else {
            format!("{}.csv", name)
        };
        let path = self.data_dir.join(file_name);

        let canonical = path
            .canonicalize()
            .map_err(|_| CatalogError::NotFound(name.to_string()))?;
        let root = self
            .data_dir
            .canonicalize()
            .map_err(CatalogError::DataDir)?;
        if !canonical.starts_with(&root) {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        Ok(canonical)
    }

    /// Loads a dataset by name, reusing the cached copy while the file's
    /// modification time is unchanged.
    pub fn open(&self, name: &str) -> Result<Arc<Dataset>, CatalogError> {
        let path = self.resolve(name)?;
        let stem = dataset_stem(&path);

        let modified = path
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        {
            let cache = self.cache.lock().expect("catalog cache poisoned");
            if let Some(entry) = cache.get(&path) {
                if entry.modified == modified {
                    return Ok(Arc::clone(&entry.dataset));
                }
            }
        }

        let dataset = Arc::new(loader::load_csv(&path, &stem)?);
        let rows = dataset.row_count().to_string();
        let cols = dataset.column_count().to_string();
        Logger::info(
            "DATASET_LOADED",
            &[
                ("cols", cols.as_str()),
                ("dataset", stem.as_str()),
                ("rows", rows.as_str()),
            ],
        );

        let mut cache = self.cache.lock().expect("catalog cache poisoned");
        cache.insert(
            path,
            CachedDataset {
                dataset: Arc::clone(&dataset),
                modified,
            },
        );
        Ok(dataset)
    }

    /// Lists the `*.csv` files in the data directory, sorted by name.
    ///
    /// Row and column counts are best-effort: a file that fails to parse is
    /// still listed, with the counts absent.
    pub fn list(&self) -> Result<Vec<DatasetSummary>, CatalogError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir).map_err(CatalogError::DataDir)? {
            let entry = entry.map_err(CatalogError::DataDir)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") && path.is_file() {
                names.push(dataset_stem(&path));
            }
        }
        names.sort();

        let mut summaries = Vec::with_capacity(names.len());
        for name in names {
            let (rows, cols) = match self.open(&name) {
                Ok(dataset) => (Some(dataset.row_count()), Some(dataset.column_count())),
                Err(_) => (None, None),
            };
            summaries.push(DatasetSummary { name, rows, cols });
        }
        Ok(summaries)
    }
}

fn dataset_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
