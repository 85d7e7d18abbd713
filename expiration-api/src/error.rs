use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use common::expirations::KeyId;
use serde_json::json;
use thiserror::Error;

/// Represents a runtime error that needs to be mapped
/// to an HTTP response
#[derive(Error, Debug)]
pub enum AppError {
    #[error("request body is not JSON: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("timestamp is missing or not an integer")]
    InvalidTimestamp,
    #[error("no expiration for key {0}")]
    KeyNotFound(KeyId),
    #[error("storage error: {0}")]
    Storage(#[from] common::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, err_msg): (StatusCode, &'static str) = match &self {
            Self::InvalidJson(_) => (StatusCode::BAD_REQUEST, "Invalid request: JSON required"),
            Self::InvalidTimestamp => (StatusCode::BAD_REQUEST, "Invalid timestamp"),
            Self::KeyNotFound(_) => (StatusCode::NOT_FOUND, "Key not found"),
            Self::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to persist expirations",
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error from expiration API: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let body = Json(json!({
            "error": err_msg,
        }));

        (status, body).into_response()
    }
}
