//! Typed cell values
//!
//! Every raw text field passes through exactly one coercion function, so the
//! evaluator and the schema inferencer never re-guess types on their own.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// A single table cell, coerced from raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty field
    Null,
    /// `true` / `false`, case-insensitive
    Bool(bool),
    /// Finite floating-point number
    Number(f64),
    /// Anything else, verbatim
    Text(String),
}

impl CellValue {
    /// Coerces a raw text field into a typed value.
    ///
    /// Order is fixed: empty → Null, boolean literal → Bool, finite numeric
    /// literal → Number, fallback → Text. The same ladder applies to bare
    /// filter operands, so `amount>=100` compares numerically and
    /// `active==true` compares as a boolean.
    pub fn coerce(raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Null;
        }
        if raw.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }
        if let Ok(n) = raw.parse::<f64>() {
            // f64::from_str accepts "inf" and "NaN"; those stay text.
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
        CellValue::Text(raw.to_string())
    }

    /// Returns true for the Null variant.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Rank for cross-type ordering: Bool < Number < Text.
    ///
    /// Null is deliberately absent; the sorter places nulls itself so that
    /// direction never moves them.
    fn type_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Compares two non-null values for sorting.
    ///
    /// Numbers compare numerically, text by code point, booleans as
    /// false < true. Across types the rank above decides, which keeps the
    /// comparator total for mixed columns.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => {
                // Coerced numbers are always finite.
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Renders the value as text for case-insensitive containment.
    ///
    /// Null has no text form: it never contains and is never contained.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => {
                // Whole numbers render as JSON integers, not "42.0".
                if n.fract() == 0.0 && n.abs() < (i64::MAX as f64) {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < (i64::MAX as f64) {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
