//! Parser totality: every filter string either yields a clause list or a
//! positioned parse error, never a silent empty result.

use csvserve::dataset::CellValue;
use csvserve::query::{parse_filter, parse_sort, FilterOp, Operand};

#[test]
fn documented_example_parses_to_two_clauses() {
    let clauses = parse_filter("status==active;amount>=100").unwrap();
    assert_eq!(clauses.len(), 2);
    assert_eq!(
        (clauses[0].column.as_str(), clauses[0].op),
        ("status", FilterOp::Eq)
    );
    assert_eq!(
        clauses[0].operand,
        Operand::Value(CellValue::Text("active".into()))
    );
    assert_eq!(
        (clauses[1].column.as_str(), clauses[1].op),
        ("amount", FilterOp::Ge)
    );
    assert_eq!(clauses[1].operand, Operand::Value(CellValue::Number(100.0)));
}

#[test]
fn every_operator_is_reachable() {
    let cases = [
        ("a==1", FilterOp::Eq),
        ("a!=1", FilterOp::Ne),
        ("a>=1", FilterOp::Ge),
        ("a<=1", FilterOp::Le),
        ("a>1", FilterOp::Gt),
        ("a<1", FilterOp::Lt),
        ("a in [1]", FilterOp::In),
        ("a~1", FilterOp::ContainsCi),
    ];
    for (input, op) in cases {
        let clauses = parse_filter(input).unwrap();
        assert_eq!(clauses[0].op, op, "input {:?}", input);
    }
}

#[test]
fn quoted_operands_survive_grammar_characters() {
    let clauses = parse_filter(r#"note=="x; y, in == z";flag!="true""#).unwrap();
    assert_eq!(
        clauses[0].operand,
        Operand::Value(CellValue::Text("x; y, in == z".into()))
    );
    assert_eq!(
        clauses[1].operand,
        Operand::Value(CellValue::Text("true".into()))
    );
}

#[test]
fn malformed_inputs_fail_with_positions() {
    let cases: &[(&str, &str)] = &[
        ("status active", "missing operator"),
        ("status=active", "unknown operator"),
        ("note==\"oops", "unterminated quoted string"),
        ("country in [US", "unterminated list"),
        ("country in US", "requires a bracketed list"),
        ("country==[US]", "only valid with 'in'"),
        ("a==1;;b==2", "empty filter clause"),
        ("==x", "missing column name"),
        ("a==", "missing operand"),
    ];
    for (input, fragment) in cases {
        let err = parse_filter(input).unwrap_err();
        assert!(
            err.reason.contains(fragment),
            "input {:?}: got {:?}",
            input,
            err.reason
        );
        assert!(err.position <= input.len());
    }
}

#[test]
fn sort_parsing_is_total_too() {
    let keys = parse_sort("amount:desc,name").unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys[0].descending);
    assert!(!keys[1].descending);

    assert!(parse_sort("amount:sideways").is_err());
    assert!(parse_sort(":desc").is_err());
    assert!(parse_sort("a,,b").is_err());
    assert!(parse_sort("").unwrap().is_empty());
}
