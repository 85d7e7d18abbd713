use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::expirations::{ExpirationStore, ExpirationTable, KeyId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostExpirationResponse {
    pub success: bool,
    pub key_id: KeyId,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteExpirationResponse {
    pub success: bool,
    pub message: String,
}

pub async fn get_expirations(
    State(store): State<Arc<dyn ExpirationStore>>,
) -> Json<ExpirationTable> {
    Json(store.get_all().await)
}

/// The body is taken as a loose JSON value so that a wrongly typed `timestamp`
/// is reported as an invalid timestamp rather than as invalid JSON.
pub async fn post_expiration(
    State(store): State<Arc<dyn ExpirationStore>>,
    Path(key_id): Path<KeyId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PostExpirationResponse>), AppError> {
    let Json(body) = body?;

    let timestamp = body
        .get("timestamp")
        .and_then(Value::as_i64)
        .ok_or(AppError::InvalidTimestamp)?;

    store.upsert(&key_id, timestamp).await?;

    tracing::info!("Expiration for key {} set to {}", key_id, timestamp);

    Ok((
        StatusCode::CREATED,
        Json(PostExpirationResponse {
            success: true,
            key_id,
            timestamp,
        }),
    ))
}

pub async fn delete_expiration(
    State(store): State<Arc<dyn ExpirationStore>>,
    Path(key_id): Path<KeyId>,
) -> Result<Json<DeleteExpirationResponse>, AppError> {
    if !store.delete(&key_id).await? {
        return Err(AppError::KeyNotFound(key_id));
    }

    tracing::info!("Expiration for key {} removed", key_id);

    Ok(Json(DeleteExpirationResponse {
        success: true,
        message: format!("Expiration for key {key_id} removed."),
    }))
}
