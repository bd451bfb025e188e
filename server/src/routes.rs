use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use flatrate::types::{DeletionReceipt, WorkLog, WorkLogInput};

use crate::auth::require_api_key;
use crate::error::ApiError;
use crate::state::AppState;

const EXPORT_FILENAME: &str = "flatrate_export.csv";

/// Optional inclusive date bounds, `YYYY-MM-DD`; absence means unbounded
/// in that direction.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

/// Payload of the bulk import endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkImportRequest {
    items: Vec<WorkLogInput>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/logs", get(list_logs).post(create_log))
        .route("/logs/{id}", put(update_log).delete(delete_log))
        .route("/export.csv", get(export_csv))
        .route("/import", post(bulk_import))
        .with_state(state)
}

/// Liveness probe; the only route that skips the API key check.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "has_api_key": state.api_key.is_some() }))
}

async fn list_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<WorkLog>>, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let work_logs = state.service.list(range.from_date, range.to_date)?;
    Ok(Json(work_logs))
}

async fn create_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<WorkLogInput>,
) -> Result<Json<WorkLog>, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let created = state.service.create(&input)?;
    Ok(Json(created))
}

async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<WorkLogInput>,
) -> Result<Json<WorkLog>, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let updated = state.service.update(id, &input)?;
    Ok(Json(updated))
}

async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeletionReceipt>, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let receipt = state.service.delete(id)?;
    Ok(Json(receipt))
}

async fn export_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(range): Query<DateRangeQuery>,
) -> Result<Response, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let body = state.service.export_csv(range.from_date, range.to_date)?;
    let response = (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response();
    Ok(response)
}

async fn bulk_import(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BulkImportRequest>,
) -> Result<Json<Value>, ApiError> {
    require_api_key(state.api_key.as_deref(), &headers)?;
    let imported = state.service.import(&payload.items)?;
    Ok(Json(json!({ "imported": imported })))
}
