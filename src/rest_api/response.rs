//! Response formatting
//!
//! Standard response bodies for the data endpoints. Page items are JSON
//! objects keyed by column name, in the dataset's column order.

use serde::Serialize;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::query::{QueryResult, SchemaField};

/// One page of rows plus the pagination window.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Matches after filtering, before pagination
    pub total: usize,
    /// Effective limit after defaulting and clamping
    pub limit: usize,
    /// Effective offset after clamping
    pub offset: usize,
    pub items: Vec<Value>,
}

impl Page {
    /// Renders an engine result against its dataset's columns.
    pub fn from_result(dataset: &Dataset, result: &QueryResult) -> Self {
        Self {
            total: result.total_matched,
            limit: result.limit,
            offset: result.offset,
            items: result
                .rows
                .iter()
                .map(|row| dataset.row_object(row))
                .collect(),
        }
    }
}

/// Schema response for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaResponse {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

/// Body for `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
