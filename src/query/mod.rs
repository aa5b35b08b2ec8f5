//! Tabular query engine for csvserve
//!
//! Purely computational: the engine borrows a `Dataset` snapshot and a raw
//! query, and produces a result page or a typed parse error. It never
//! touches the filesystem, HTTP, or process lifecycle.
//!
//! # Execution flow (strict order)
//!
//! 1. Parse filter → clause list
//! 2. Parse sort → key list
//! 3. Filter rows (input order preserved)
//! 4. Stable sort
//! 5. Count total matches
//! 6. Clamp and slice the page
//!
//! Parse failures are atomic; semantic mismatches (missing column, type
//! mismatch in a comparison) degrade to "no match" instead of failing.

mod errors;
mod executor;
mod filter;
mod parser;
mod schema;
mod sorter;

pub use errors::{ParseError, QueryError};
pub use executor::{EngineConfig, QueryExecutor, QueryResult};
pub use filter::{bind_clauses, row_matches, BoundClause, FilterClause, FilterOp, Operand};
pub use parser::parse_filter;
pub use schema::{infer_schema, InferredType, SchemaField};
pub use sorter::{parse_sort, sort_rows, SortKey};
