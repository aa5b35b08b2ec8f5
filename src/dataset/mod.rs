//! Dataset subsystem for csvserve
//!
//! Everything that knows about files and raw text lives here: the typed
//! value model, the in-memory table, the CSV loader, and the catalog that
//! resolves and caches datasets. The query engine only sees `Dataset`
//! borrows handed out by this module.

mod catalog;
mod loader;
mod table;
mod value;

pub use catalog::{CatalogError, DatasetCatalog, DatasetSummary};
pub use loader::{load_csv, LoadError};
pub use table::{Dataset, Row};
pub use value::CellValue;
