//! Filter clauses and predicate evaluation
//!
//! A parsed filter is an ordered list of clauses combined with logical AND.
//! Evaluation never fails and never mutates a row: a missing column or an
//! incomparable pair of values simply excludes the row, so one lenient
//! clause cannot abort an otherwise valid multi-clause filter.

use serde::Serialize;

use crate::dataset::{CellValue, Dataset, Row};

/// Comparison operators of the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
    In,
    ContainsCi,
}

impl FilterOp {
    /// Surface syntax for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "==",
            FilterOp::Ne => "!=",
            FilterOp::Ge => ">=",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
            FilterOp::In => "in",
            FilterOp::ContainsCi => "~",
        }
    }
}

/// Right-hand side of a clause: a single value, or a list for `in`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(CellValue),
    List(Vec<CellValue>),
}

/// One column/operator/operand predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub column: String,
    pub op: FilterOp,
    pub operand: Operand,
}

/// A clause with its column resolved against one dataset.
///
/// Binding happens once per query; a clause whose column is absent from the
/// dataset is bound to `None` and matches nothing.
pub struct BoundClause<'a> {
    clause: &'a FilterClause,
    column: Option<usize>,
}

/// Resolves clause columns against the dataset's header.
pub fn bind_clauses<'a>(clauses: &'a [FilterClause], dataset: &Dataset) -> Vec<BoundClause<'a>> {
    clauses
        .iter()
        .map(|clause| BoundClause {
            clause,
            column: dataset.column_index(&clause.column),
        })
        .collect()
}

/// True iff the row matches every bound clause. An empty list matches all.
pub fn row_matches(bound: &[BoundClause<'_>], row: &Row) -> bool {
    bound.iter().all(|clause| clause.matches(row))
}

impl BoundClause<'_> {
    /// Evaluates this clause against one row.
    pub fn matches(&self, row: &Row) -> bool {
        let index = match self.column {
            Some(index) => index,
            None => return false,
        };
        let cell = row.get(index);

        match (&self.clause.op, &self.clause.operand) {
            (FilterOp::Eq, Operand::Value(operand)) => eq_match(cell, operand),
            (FilterOp::Ne, Operand::Value(operand)) => !eq_match(cell, operand),
            (FilterOp::Ge, Operand::Value(operand)) => order_match(cell, operand, |o| o >= 0),
            (FilterOp::Le, Operand::Value(operand)) => order_match(cell, operand, |o| o <= 0),
            (FilterOp::Gt, Operand::Value(operand)) => order_match(cell, operand, |o| o > 0),
            (FilterOp::Lt, Operand::Value(operand)) => order_match(cell, operand, |o| o < 0),
            (FilterOp::In, Operand::List(values)) => {
                values.iter().any(|value| eq_match(cell, value))
            }
            (FilterOp::ContainsCi, Operand::Value(operand)) => contains_ci(cell, operand),
            // The parser never produces a list for non-`in` operators or a
            // single value for `in`.
            _ => false,
        }
    }
}

/// Tag-and-content equality. Types are never coerced across each other, so a
/// numeric cell never equals a textual operand.
fn eq_match(cell: &CellValue, operand: &CellValue) -> bool {
    cell == operand
}

/// Ordering comparisons are defined only for Number↔Number and Text↔Text;
/// anything else (including Null on either side) is simply no match.
fn order_match(cell: &CellValue, operand: &CellValue, accept: impl Fn(i8) -> bool) -> bool {
    let ordering = match (cell, operand) {
        (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b),
        (CellValue::Text(a), CellValue::Text(b)) => Some(a.cmp(b)),
        _ => None,
    };
    match ordering {
        Some(std::cmp::Ordering::Less) => accept(-1),
        Some(std::cmp::Ordering::Equal) => accept(0),
        Some(std::cmp::Ordering::Greater) => accept(1),
        None => false,
    }
}

/// Case-insensitive substring test over the text renderings of both sides.
/// Null never contains and is never contained.
fn contains_ci(cell: &CellValue, operand: &CellValue) -> bool {
    match (cell.as_text(), operand.as_text()) {
        (Some(haystack), Some(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}
