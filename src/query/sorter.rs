//! Sort key parsing and stable multi-key sorting
//!
//! Sort specs look like `amount:desc,name`: a comma-separated list of
//! columns, each with an optional `:asc`/`:desc` suffix. Later keys break
//! ties of earlier keys; the underlying sort is stable, so fully tied rows
//! keep their original relative order.
//!
//! Null placement is a documented policy, not an accident: Null sorts before
//! every non-null value in both directions. Direction reverses only the
//! ordering among non-null values.

use std::cmp::Ordering;

use crate::dataset::{Dataset, Row};

use super::errors::ParseError;

/// One parsed sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

/// Parses a raw sort string into an ordered key list.
pub fn parse_sort(input: &str) -> Result<Vec<SortKey>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut keys = Vec::new();
    let mut offset = 0usize;
    for segment in input.split(',') {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return Err(ParseError::new(offset, "empty sort key"));
        }

        let (column, descending) = match trimmed.split_once(':') {
            Some((column, direction)) => {
                let descending = match direction.trim().to_ascii_lowercase().as_str() {
                    "asc" => false,
                    "desc" => true,
                    other => {
                        return Err(ParseError::new(
                            offset,
                            format!("unknown sort direction '{}' (expected asc or desc)", other),
                        ));
                    }
                };
                (column.trim(), descending)
            }
            None => (trimmed, false),
        };

        if column.is_empty() {
            return Err(ParseError::new(offset, "missing column name in sort key"));
        }

        keys.push(SortKey {
            column: column.to_string(),
            descending,
        });
        offset += segment.len() + 1;
    }
    Ok(keys)
}

/// Stable-sorts row references by the given keys.
///
/// A key naming a column absent from the dataset compares every row as Null,
/// which makes it a stable no-op rather than an error.
pub fn sort_rows(dataset: &Dataset, rows: &mut [&Row], keys: &[SortKey]) {
    let resolved: Vec<(Option<usize>, bool)> = keys
        .iter()
        .map(|key| (dataset.column_index(&key.column), key.descending))
        .collect();

    rows.sort_by(|a, b| {
        for &(index, descending) in &resolved {
            let ordering = match index {
                Some(index) => compare_cells(a, b, index, descending),
                None => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_cells(a: &Row, b: &Row, index: usize, descending: bool) -> Ordering {
    let av = a.get(index);
    let bv = b.get(index);
    match (av.is_null(), bv.is_null()) {
        (true, true) => Ordering::Equal,
        // Null first, independent of direction.
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let ordering = av.sort_cmp(bv);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}
