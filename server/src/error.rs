use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use flatrate::error::WorklogError;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures a handler can produce, each mapped 1:1 to a response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("internal server error")]
    Internal(String),
}

impl From<WorklogError> for ApiError {
    fn from(err: WorklogError) -> Self {
        match err {
            WorklogError::NotFound(_) => ApiError::NotFound,
            WorklogError::Validation { .. } => ApiError::Validation(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(reason) => {
                // The caller gets a generic body; the cause stays in the log.
                error!("request failed: {reason}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let detail = match &self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
