//! REST API HTTP server
//!
//! Axum router over the dataset catalog and the query engine. Routes mirror
//! the read-only surface of the service:
//!
//! - `GET /health`
//! - `GET /api/v1/datasets`
//! - `GET /api/v1/data/{name}` with `filter`, `sort`, `limit`, `offset`
//! - `GET /api/v1/data/{name}/schema`
//! - `GET /api/v1/data/{name}/count` with `filter`
//!
//! CORS is wide open; the server is read-only.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::dataset::{DatasetCatalog, DatasetSummary};
use crate::observability::Logger;
use crate::query::QueryExecutor;

use super::errors::{ApiError, ApiResult};
use super::response::{HealthResponse, Page, SchemaResponse};

/// Shared state behind every handler.
pub struct AppState {
    pub catalog: DatasetCatalog,
    pub executor: QueryExecutor,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            catalog: DatasetCatalog::new(config.data_dir.clone()),
            executor: QueryExecutor::new(config.engine_config()),
        }
    }
}

/// Query parameters accepted by the data endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Builds the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/datasets", get(list_handler))
        .route("/api/v1/data/{name}", get(data_handler))
        .route("/api/v1/data/{name}/schema", get(schema_handler))
        .route("/api/v1/data/{name}/count", get(count_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listen address and serves until shutdown.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::from_config(&config));

    let data_dir = config.data_dir.display().to_string();
    Logger::info(
        "SERVER_START",
        &[
            ("bind_addr", bind_addr.as_str()),
            ("data_dir", data_dir.as_str()),
        ],
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn list_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DatasetSummary>>> {
    Ok(Json(state.catalog.list()?))
}

async fn data_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<DataQuery>,
) -> ApiResult<Json<Page>> {
    let dataset = state.catalog.open(&name).map_err(|err| {
        let err = ApiError::from(err);
        if err.status_code().is_server_error() {
            let reason = err.to_string();
            Logger::error(
                "DATASET_LOAD_FAILED",
                &[("dataset", name.as_str()), ("reason", reason.as_str())],
            );
        }
        err
    })?;
    let result = state
        .executor
        .execute(
            &dataset,
            params.filter.as_deref(),
            params.sort.as_deref(),
            params.limit,
            params.offset,
        )
        .map_err(|err| {
            let reason = err.to_string();
            Logger::warn(
                "QUERY_REJECTED",
                &[("dataset", name.as_str()), ("reason", reason.as_str())],
            );
            ApiError::from(err)
        })?;

    let matched = result.total_matched.to_string();
    let returned = result.rows.len().to_string();
    Logger::info(
        "QUERY_EXECUTED",
        &[
            ("dataset", name.as_str()),
            ("matched", matched.as_str()),
            ("returned", returned.as_str()),
        ],
    );
    Ok(Json(Page::from_result(&dataset, &result)))
}

async fn schema_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<SchemaResponse>> {
    let dataset = state.catalog.open(&name)?;
    Ok(Json(SchemaResponse {
        name: dataset.name().to_string(),
        fields: state.executor.schema(&dataset),
    }))
}

async fn count_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<DataQuery>,
) -> ApiResult<Json<usize>> {
    let dataset = state.catalog.open(&name)?;
    let count = state.executor.count(&dataset, params.filter.as_deref())?;
    Ok(Json(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds() {
        let config = ServerConfig::default();
        let _router = router(Arc::new(AppState::from_config(&config)));
    }

    #[tokio::test]
    async fn test_data_handler_logs_unloadable_dataset() {
        let dir = tempfile::tempdir().unwrap();
        // Header row missing, so the load fails with a 500-class error.
        std::fs::File::create(dir.path().join("broken.csv")).unwrap();
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = Arc::new(AppState::from_config(&config));

        Logger::clear_captured();
        let err = data_handler(
            State(state),
            Path("broken".to_string()),
            Query(DataQuery::default()),
        )
        .await
        .unwrap_err();

        assert!(err.status_code().is_server_error());
        assert!(Logger::captured()
            .iter()
            .any(|l| l.contains("\"event\":\"DATASET_LOAD_FAILED\"")
                && l.contains("\"severity\":\"ERROR\"")
                && l.contains("\"dataset\":\"broken\"")));
    }

    #[test]
    fn test_data_query_fields_are_optional() {
        let params: DataQuery = serde_json::from_str("{}").unwrap();
        assert!(params.filter.is_none());
        assert!(params.limit.is_none());

        let params: DataQuery =
            serde_json::from_str(r#"{"filter":"a==1","sort":"a:desc","limit":5,"offset":2}"#)
                .unwrap();
        assert_eq!(params.filter.as_deref(), Some("a==1"));
        assert_eq!(params.sort.as_deref(), Some("a:desc"));
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.offset, Some(2));
    }
}
