//! Filter expression parser
//!
//! A hand-rolled, quote-aware scanner over the raw filter string. All of the
//! quoting and escaping edge cases live here, nowhere else: the clauses it
//! produces carry already-coerced operands.
//!
//! Grammar:
//!
//! ```text
//! filter   := clause (";" clause)*
//! clause   := identifier operator operand
//! operator := "==" | "!=" | ">=" | "<=" | ">" | "<" | "in" | "~"
//! operand  := list | quoted_string | bare_token
//! list     := "[" bare_token ("," bare_token)* "]"
//! ```
//!
//! Parsing is total: every input yields a clause list or a `ParseError` with
//! the offending byte position. A blank input yields an empty clause list,
//! which matches every row.

use crate::dataset::CellValue;

use super::errors::ParseError;
use super::filter::{FilterClause, FilterOp, Operand};

/// Parses a raw filter string into an ordered clause list.
pub fn parse_filter(input: &str) -> Result<Vec<FilterClause>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let segments = split_segments(input)?;
    let mut clauses = Vec::with_capacity(segments.len());
    for (start, raw) in segments {
        clauses.push(parse_clause(start, raw)?);
    }
    Ok(clauses)
}

/// Splits the input at semicolons outside quoted strings, keeping each
/// segment's byte offset for error reporting.
fn split_segments(input: &str) -> Result<Vec<(usize, &str)>, ParseError> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut quote_open = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => {
                if !in_quote {
                    quote_open = i;
                }
                in_quote = !in_quote;
            }
            b';' if !in_quote => {
                segments.push((start, &input[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    if in_quote {
        return Err(ParseError::new(quote_open, "unterminated quoted string"));
    }
    segments.push((start, &input[start..]));
    Ok(segments)
}

/// Parses one `column operator operand` segment. `base` is the segment's
/// byte offset in the whole filter string.
fn parse_clause(base: usize, raw: &str) -> Result<FilterClause, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::new(base, "empty filter clause"));
    }

    let (op_start, op_end, op) = find_operator(base, raw)?;

    let column = raw[..op_start].trim();
    if column.is_empty() {
        return Err(ParseError::new(base, "missing column name"));
    }

    let rest = &raw[op_end..];
    let operand_offset = base + op_end + (rest.len() - rest.trim_start().len());
    let operand_raw = rest.trim();
    if operand_raw.is_empty() {
        return Err(ParseError::new(
            base + op_end,
            format!("missing operand after '{}'", op.as_str()),
        ));
    }

    let operand = parse_operand(op, operand_raw, operand_offset)?;
    Ok(FilterClause {
        column: column.to_string(),
        op,
        operand,
    })
}

/// Finds the leftmost operator outside quoted regions.
///
/// Returns `(start, end, op)` in segment-relative byte offsets. A lone `=`
/// or `!` is an unknown operator; `in` only counts when surrounded by
/// whitespace so that column names containing "in" parse cleanly.
fn find_operator(base: usize, raw: &str) -> Result<(usize, usize, FilterOp), ParseError> {
    let bytes = raw.as_bytes();
    let mut in_quote = false;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' {
            in_quote = !in_quote;
            i += 1;
            continue;
        }
        if in_quote {
            i += 1;
            continue;
        }
        match b {
            b'=' => {
                return if bytes.get(i + 1) == Some(&b'=') {
                    Ok((i, i + 2, FilterOp::Eq))
                } else {
                    Err(ParseError::new(base + i, "unknown operator '='"))
                };
            }
            b'!' => {
                return if bytes.get(i + 1) == Some(&b'=') {
                    Ok((i, i + 2, FilterOp::Ne))
                } else {
                    Err(ParseError::new(base + i, "unknown operator '!'"))
                };
            }
            b'>' => {
                return if bytes.get(i + 1) == Some(&b'=') {
                    Ok((i, i + 2, FilterOp::Ge))
                } else {
                    Ok((i, i + 1, FilterOp::Gt))
                };
            }
            b'<' => {
                return if bytes.get(i + 1) == Some(&b'=') {
                    Ok((i, i + 2, FilterOp::Le))
                } else {
                    Ok((i, i + 1, FilterOp::Lt))
                };
            }
            b'~' => return Ok((i, i + 1, FilterOp::ContainsCi)),
            b'i' | b'I' => {
                let preceded = i > 0 && bytes[i - 1].is_ascii_whitespace();
                let n_next = matches!(bytes.get(i + 1), Some(&b'n') | Some(&b'N'));
                let followed = bytes.get(i + 2).is_some_and(|b| b.is_ascii_whitespace());
                if preceded && n_next && followed {
                    return Ok((i, i + 2, FilterOp::In));
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    Err(ParseError::new(
        base,
        "missing operator (expected one of ==, !=, >=, <=, >, <, in, ~)",
    ))
}

/// Parses the operand text for one operator. `offset` is the operand's byte
/// offset in the whole filter string.
fn parse_operand(op: FilterOp, raw: &str, offset: usize) -> Result<Operand, ParseError> {
    if op == FilterOp::In {
        if !raw.starts_with('[') {
            return Err(ParseError::new(offset, "'in' requires a bracketed list"));
        }
        if raw.len() < 2 || !raw.ends_with(']') {
            return Err(ParseError::new(offset, "unterminated list"));
        }
        let values = raw[1..raw.len() - 1]
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(CellValue::coerce)
            .collect();
        return Ok(Operand::List(values));
    }

    if raw.starts_with('[') {
        return Err(ParseError::new(
            offset,
            "bracketed list is only valid with 'in'",
        ));
    }

    if let Some(rest) = raw.strip_prefix('"') {
        // The segment splitter already guarantees a closing quote exists.
        let close = rest
            .find('"')
            .ok_or_else(|| ParseError::new(offset, "unterminated quoted string"))?;
        let trailing = &rest[close + 1..];
        if !trailing.trim().is_empty() {
            return Err(ParseError::new(
                offset + close + 2,
                "unexpected characters after quoted string",
            ));
        }
        // Quoted operands are verbatim text, never re-coerced.
        return Ok(Operand::Value(CellValue::Text(rest[..close].to_string())));
    }

    Ok(Operand::Value(CellValue::coerce(raw)))
}
