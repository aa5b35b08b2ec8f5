//! End-to-end invariants of the query engine: filter → sort → paginate over
//! an in-memory dataset, with the documented Null and stability policies.

use csvserve::dataset::{CellValue, Dataset};
use csvserve::query::{EngineConfig, QueryError, QueryExecutor};

fn orders() -> Dataset {
    Dataset::from_records(
        "orders",
        vec![
            "country".into(),
            "status".into(),
            "amount".into(),
            "name".into(),
        ],
        vec![
            vec!["US".into(), "active".into(), "100".into(), "Alice Smith".into()],
            vec!["JP".into(), "closed".into(), "40".into(), "bob".into()],
            vec!["FR".into(), "active".into(), "".into(), "Alina".into()],
            vec!["CN".into(), "active".into(), "250".into(), "carol".into()],
            vec!["JP".into(), "active".into(), "100".into(), "dave".into()],
        ],
    )
}

fn executor() -> QueryExecutor {
    QueryExecutor::new(EngineConfig::default())
}

#[test]
fn empty_filter_matches_every_row() {
    let ds = orders();
    let result = executor().execute(&ds, Some(""), None, None, None).unwrap();
    assert_eq!(result.total_matched, ds.row_count());
}

#[test]
fn and_chained_clauses() {
    let ds = orders();
    let result = executor()
        .execute(&ds, Some("status==active;amount>=100"), None, None, None)
        .unwrap();
    assert_eq!(result.total_matched, 3);
}

#[test]
fn in_clause_matches_membership() {
    let ds = orders();
    let result = executor()
        .execute(&ds, Some("country in [US,JP,CN]"), None, None, None)
        .unwrap();
    // FR is excluded.
    assert_eq!(result.total_matched, 4);
}

#[test]
fn contains_is_case_insensitive() {
    let ds = orders();
    let result = executor()
        .execute(&ds, Some("name~alice"), None, None, None)
        .unwrap();
    assert_eq!(result.total_matched, 1);
    assert_eq!(result.rows[0].get(3), &CellValue::Text("Alice Smith".into()));
}

#[test]
fn sort_is_stable_on_equal_keys() {
    let ds = orders();
    let result = executor()
        .execute(&ds, Some("amount==100"), Some("amount:asc"), None, None)
        .unwrap();
    // Alice Smith (row 0) precedes dave (row 4) after a tied sort.
    assert_eq!(result.rows[0].get(3), &CellValue::Text("Alice Smith".into()));
    assert_eq!(result.rows[1].get(3), &CellValue::Text("dave".into()));
}

#[test]
fn null_sorts_first_in_both_directions() {
    let ds = orders();

    let asc = executor()
        .execute(&ds, None, Some("amount:asc"), None, None)
        .unwrap();
    assert_eq!(asc.rows[0].get(2), &CellValue::Null);
    assert_eq!(asc.rows[1].get(2), &CellValue::Number(40.0));

    let desc = executor()
        .execute(&ds, None, Some("amount:desc"), None, None)
        .unwrap();
    assert_eq!(desc.rows[0].get(2), &CellValue::Null);
    assert_eq!(desc.rows[1].get(2), &CellValue::Number(250.0));
}

#[test]
fn pagination_past_the_end_is_empty_not_an_error() {
    let ds = orders();
    let result = executor()
        .execute(&ds, None, None, Some(10), Some(20))
        .unwrap();
    assert!(result.rows.is_empty());
    assert_eq!(result.total_matched, 5);
}

#[test]
fn total_matched_ignores_the_page_window() {
    let ds = orders();
    let result = executor()
        .execute(&ds, Some("status==active"), None, Some(1), Some(1))
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.total_matched, 4);
}

#[test]
fn execute_is_idempotent() {
    let ds = orders();
    let exec = executor();
    let a = exec
        .execute(&ds, Some("amount>=40"), Some("amount:desc,name"), Some(3), Some(1))
        .unwrap();
    let b = exec
        .execute(&ds, Some("amount>=40"), Some("amount:desc,name"), Some(3), Some(1))
        .unwrap();
    assert_eq!(a.rows, b.rows);
    assert_eq!(a.total_matched, b.total_matched);
    assert_eq!((a.limit, a.offset), (b.limit, b.offset));
}

#[test]
fn clause_from_existing_cell_round_trips() {
    let ds = orders();
    let exec = executor();
    for (index, row) in ds.rows().iter().enumerate() {
        let country = match row.get(0) {
            CellValue::Text(s) => s.clone(),
            other => panic!("unexpected cell {:?}", other),
        };
        let result = exec
            .execute(&ds, Some(&format!("country=={}", country)), None, None, None)
            .unwrap();
        assert!(
            result.rows.contains(&ds.rows()[index]),
            "row {} missing from its own equality filter",
            index
        );
    }
}

#[test]
fn filter_errors_win_over_sort_errors() {
    let ds = orders();
    let err = executor()
        .execute(&ds, Some("status="), Some("amount:bogus"), None, None)
        .unwrap_err();
    assert!(matches!(err, QueryError::FilterParse(_)));
}

#[test]
fn mismatched_comparison_excludes_rather_than_fails() {
    let ds = orders();
    // "name" is textual; a numeric bound matches nothing but is not an error.
    let result = executor()
        .execute(&ds, Some("name>=10"), None, None, None)
        .unwrap();
    assert_eq!(result.total_matched, 0);
}

#[test]
fn dataset_is_not_mutated_by_queries() {
    let ds = orders();
    let before: Vec<_> = ds.rows().to_vec();
    let _ = executor()
        .execute(&ds, Some("status==active"), Some("amount:desc"), Some(2), Some(1))
        .unwrap();
    assert_eq!(ds.rows(), &before[..]);
}
