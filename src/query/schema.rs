//! Schema inference
//!
//! Derives one inferred type per column from a sample of already-loaded
//! rows. This never fails; disagreeing samples report `mixed`, an all-null
//! column defaults to `string`.

use serde::Serialize;

use crate::dataset::{CellValue, Dataset};

/// Inferred type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InferredType {
    String,
    Number,
    Boolean,
    Mixed,
}

/// One column in a dataset's reported schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub inferred: InferredType,
}

/// Infers the schema from up to `sample_cap` rows per column, in the
/// dataset's declared column order.
pub fn infer_schema(dataset: &Dataset, sample_cap: usize) -> Vec<SchemaField> {
    (0..dataset.column_count())
        .map(|index| SchemaField {
            name: dataset.columns()[index].clone(),
            inferred: infer_column(dataset, index, sample_cap),
        })
        .collect()
}

fn infer_column(dataset: &Dataset, index: usize, sample_cap: usize) -> InferredType {
    let mut seen: Option<InferredType> = None;
    for row in dataset.rows().iter().take(sample_cap) {
        let tag = match row.get(index) {
            CellValue::Null => continue,
            CellValue::Bool(_) => InferredType::Boolean,
            CellValue::Number(_) => InferredType::Number,
            CellValue::Text(_) => InferredType::String,
        };
        match seen {
            None => seen = Some(tag),
            Some(previous) if previous == tag => {}
            Some(_) => return InferredType::Mixed,
        }
    }
    // All sampled values null (or no rows): report string.
    seen.unwrap_or(InferredType::String)
}
