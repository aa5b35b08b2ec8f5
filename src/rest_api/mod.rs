//! REST API module
//!
//! The HTTP-layer collaborator around the query engine: routing, query
//! parameter extraction, error→status mapping, and response shaping. The
//! engine itself never sees HTTP types.

mod errors;
mod response;
mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{HealthResponse, Page, SchemaResponse};
pub use server::{router, serve, AppState, DataQuery};
