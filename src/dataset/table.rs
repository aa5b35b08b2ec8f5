//! In-memory table types
//!
//! A `Dataset` is an immutable snapshot of one CSV file: the column names in
//! file order plus the coerced rows. The query engine only ever borrows it.

use serde_json::{Map, Value};

use super::value::CellValue;

static NULL_CELL: CellValue = CellValue::Null;

/// One row, cells in the dataset's column order.
///
/// Rows are padded to the column count at construction, so `get` within the
/// column range always yields a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Returns the cell at a column index; Null when out of range.
    pub fn get(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&NULL_CELL)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

/// An immutable in-memory table presented to the query engine.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from raw text records.
    ///
    /// Short records are padded with Null; long records are truncated to the
    /// header width. Every field goes through `CellValue::coerce`.
    pub fn from_records(
        name: impl Into<String>,
        columns: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Self {
        let width = columns.len();
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells: Vec<CellValue> = record
                    .iter()
                    .take(width)
                    .map(|field| CellValue::coerce(field))
                    .collect();
                cells.resize(width, CellValue::Null);
                Row::new(cells)
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Renders a row as a JSON object keyed by column name.
    pub fn row_object(&self, row: &Row) -> Value {
        let mut object = Map::with_capacity(self.columns.len());
        for (index, column) in self.columns.iter().enumerate() {
            let cell = serde_json::to_value(row.get(index)).unwrap_or(Value::Null);
            object.insert(column.clone(), cell);
        }
        Value::Object(object)
    }
}
