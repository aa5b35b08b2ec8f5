//! Query executor
//!
//! Orchestrates one request-scoped query against a borrowed dataset, in
//! strict order:
//!
//! 1. Parse the filter string (first error wins, before any row scanning)
//! 2. Parse the sort string
//! 3. Filter rows, preserving input order
//! 4. Stable-sort the filtered rows if sort keys were given
//! 5. Record the total match count
//! 6. Clamp offset/limit and slice the page
//!
//! The executor is stateless across calls and does no I/O, so it is safe to
//! share across concurrent requests.

use crate::dataset::{Dataset, Row};

use super::errors::QueryError;
use super::filter::{bind_clauses, row_matches};
use super::parser::parse_filter;
use super::schema::{infer_schema, SchemaField};
use super::sorter::{parse_sort, sort_rows};

/// Explicit engine configuration; tests can vary every value.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Page size when the request omits `limit`
    pub default_page_size: usize,
    /// Hard ceiling for `limit`; larger requests are clamped
    pub max_page_size: usize,
    /// Row sample cap for schema inference
    pub schema_sample_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 1000,
            schema_sample_cap: 10_000,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Rows after filter and sort, sliced to the page window
    pub rows: Vec<Row>,
    /// Count after filtering, before pagination
    pub total_matched: usize,
    /// Effective limit after defaulting and clamping
    pub limit: usize,
    /// Effective offset after clamping
    pub offset: usize,
}

/// Applies parsed predicates, sort keys, and pagination to datasets.
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    config: EngineConfig,
}

impl QueryExecutor {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Executes one query and returns a page plus the total match count.
    ///
    /// Either the full page is produced or the first parse error is returned
    /// atomically; there are no partial results. Re-running with identical
    /// arguments on an unchanged dataset yields an identical result.
    pub fn execute(
        &self,
        dataset: &Dataset,
        filter: Option<&str>,
        sort: Option<&str>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<QueryResult, QueryError> {
        let clauses = parse_filter(filter.unwrap_or_default()).map_err(QueryError::FilterParse)?;
        let keys = parse_sort(sort.unwrap_or_default()).map_err(QueryError::SortParse)?;

        let bound = bind_clauses(&clauses, dataset);
        let mut matched: Vec<&Row> = dataset
            .rows()
            .iter()
            .filter(|row| row_matches(&bound, row))
            .collect();

        if !keys.is_empty() {
            sort_rows(dataset, &mut matched, &keys);
        }

        let total_matched = matched.len();
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        let offset = offset.unwrap_or(0).min(total_matched);

        let rows = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(QueryResult {
            rows,
            total_matched,
            limit,
            offset,
        })
    }

    /// Filtered row count without materializing a page.
    pub fn count(&self, dataset: &Dataset, filter: Option<&str>) -> Result<usize, QueryError> {
        let clauses = parse_filter(filter.unwrap_or_default()).map_err(QueryError::FilterParse)?;
        let bound = bind_clauses(&clauses, dataset);
        Ok(dataset
            .rows()
            .iter()
            .filter(|row| row_matches(&bound, row))
            .count())
    }

    /// Schema inference with the configured sample cap.
    pub fn schema(&self, dataset: &Dataset) -> Vec<SchemaField> {
        infer_schema(dataset, self.config.schema_sample_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn dataset() -> Dataset {
        Dataset::from_records(
            "orders",
            vec!["status".into(), "amount".into()],
            vec![
                vec!["active".into(), "100".into()],
                vec!["closed".into(), "40".into()],
                vec!["active".into(), "250".into()],
                vec!["active".into(), "70".into()],
            ],
        )
    }

    fn executor() -> QueryExecutor {
        QueryExecutor::new(EngineConfig::default())
    }

    #[test]
    fn test_filter_then_sort_then_slice() {
        let ds = dataset();
        let result = executor()
            .execute(&ds, Some("status==active"), Some("amount:desc"), Some(2), Some(0))
            .unwrap();

        assert_eq!(result.total_matched, 3);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].get(1), &CellValue::Number(250.0));
        assert_eq!(result.rows[1].get(1), &CellValue::Number(100.0));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let ds = dataset();
        let result = executor().execute(&ds, None, None, None, None).unwrap();
        assert_eq!(result.total_matched, ds.row_count());
    }

    #[test]
    fn test_offset_past_end_yields_empty_page() {
        let ds = dataset();
        let result = executor()
            .execute(&ds, None, None, Some(10), Some(20))
            .unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.total_matched, 4);
        assert_eq!(result.offset, 4);
    }

    #[test]
    fn test_limit_defaults_and_clamps() {
        let ds = dataset();
        let exec = QueryExecutor::new(EngineConfig {
            default_page_size: 2,
            max_page_size: 3,
            schema_sample_cap: 10,
        });

        let defaulted = exec.execute(&ds, None, None, None, None).unwrap();
        assert_eq!(defaulted.rows.len(), 2);
        assert_eq!(defaulted.limit, 2);

        let clamped = exec.execute(&ds, None, None, Some(100), None).unwrap();
        assert_eq!(clamped.rows.len(), 3);
        assert_eq!(clamped.limit, 3);
    }

    #[test]
    fn test_filter_error_reported_before_sort_error() {
        let ds = dataset();
        let err = executor()
            .execute(&ds, Some("status="), Some("amount:sideways"), None, None)
            .unwrap_err();
        assert!(matches!(err, QueryError::FilterParse(_)));
    }

    #[test]
    fn test_sort_error_propagates() {
        let ds = dataset();
        let err = executor()
            .execute(&ds, None, Some("amount:sideways"), None, None)
            .unwrap_err();
        assert!(matches!(err, QueryError::SortParse(_)));
    }

    #[test]
    fn test_count_ignores_pagination() {
        let ds = dataset();
        assert_eq!(executor().count(&ds, Some("status==active")).unwrap(), 3);
        assert_eq!(executor().count(&ds, None).unwrap(), 4);
    }

    #[test]
    fn test_execute_is_idempotent() {
        let ds = dataset();
        let exec = executor();
        let first = exec
            .execute(&ds, Some("amount>=70"), Some("amount"), Some(2), Some(1))
            .unwrap();
        let second = exec
            .execute(&ds, Some("amount>=70"), Some("amount"), Some(2), Some(1))
            .unwrap();
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.total_matched, second.total_matched);
    }

    #[test]
    fn test_round_trip_on_existing_cell() {
        let ds = dataset();
        // Clause built from row 1's own status must match row 1.
        let result = executor()
            .execute(&ds, Some("status==closed"), None, None, None)
            .unwrap();
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.rows[0], ds.rows()[1]);
    }
}
