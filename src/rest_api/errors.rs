//! REST API errors
//!
//! Maps engine and catalog failures to HTTP statuses with a JSON
//! `{error, code}` body. Parse errors carry the offending byte position in
//! their message, so a 400 is precise enough to fix the query.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::dataset::CatalogError;
use crate::query::QueryError;

/// Result type for REST handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed filter or sort expression
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Dataset name is empty, contains separators, or escapes the data dir
    #[error("invalid dataset name: {0}")]
    InvalidDatasetName(String),

    /// No such CSV file in the data directory
    #[error("dataset '{0}' not found")]
    DatasetNotFound(String),

    /// The file exists but could not be read or parsed
    #[error("failed to load dataset: {0}")]
    DatasetLoad(String),

    /// Data directory listing failed
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidDatasetName(_) => StatusCode::BAD_REQUEST,
            ApiError::DatasetNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatasetLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidName(name) => ApiError::InvalidDatasetName(name),
            CatalogError::NotFound(name) => ApiError::DatasetNotFound(name),
            CatalogError::Load(err) => ApiError::DatasetLoad(err.to_string()),
            CatalogError::DataDir(err) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
