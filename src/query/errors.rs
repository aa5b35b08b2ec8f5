//! Query engine error types
//!
//! Parsing is total and atomic: any input either yields a full clause or
//! sort-key list, or fails here before a single row is scanned. Semantic
//! mismatches (missing column, incomparable types) are not errors; the
//! evaluator degrades them to "does not match".

use thiserror::Error;

/// A syntax error with the offending byte position in the input string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at position {position}")]
pub struct ParseError {
    pub position: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the query executor, suitable for 400-class responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid filter expression: {0}")]
    FilterParse(ParseError),

    #[error("invalid sort expression: {0}")]
    SortParse(ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(7, "unterminated quoted string");
        assert_eq!(err.to_string(), "unterminated quoted string at position 7");
    }

    #[test]
    fn test_query_error_wraps_stage() {
        let err = QueryError::FilterParse(ParseError::new(0, "missing operator"));
        assert!(err.to_string().starts_with("invalid filter expression"));
    }
}
