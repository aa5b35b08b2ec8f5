//! csvserve - a small, self-hostable query server for flat CSV files
//!
//! The core is the pure tabular query engine in [`query`]; [`dataset`]
//! loads and caches CSV files, [`rest_api`] exposes the read-only HTTP
//! surface, and [`cli`] wires it all together.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod observability;
pub mod query;
pub mod rest_api;
