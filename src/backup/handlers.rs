use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::auth::extractors::CurrentUser;
use crate::backup::dto::{BackupResponse, RestoreRequest};
use crate::backup::service;
use crate::error::ApiError;
use crate::state::AppState;

pub fn backup_routes() -> Router<AppState> {
    Router::new()
        .route("/backup", post(create_backup))
        .route("/restore", post(restore_backup))
}

#[instrument(skip(state, user))]
pub async fn create_backup(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<BackupResponse>, ApiError> {
    let backup_data = service::snapshot(&state.db, &user.id).await.map_err(|e| {
        error!(error = %e, user_id = %user.id, "backup failed");
        ApiError::Internal("backup failed".into())
    })?;

    info!(user_id = %user.id, "backup created");
    Ok(Json(BackupResponse {
        message: "backup created".into(),
        backup_data,
    }))
}

#[instrument(skip(state, user, payload))]
pub async fn restore_backup(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<RestoreRequest>,
) -> Result<Json<Value>, ApiError> {
    let raw = payload
        .backup_data
        .ok_or_else(|| ApiError::Internal("restore failed".into()))?;

    service::restore(&state.db, &user.id, &raw)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "restore failed");
            ApiError::Internal("restore failed".into())
        })?;

    info!(user_id = %user.id, "restore completed");
    Ok(Json(json!({ "message": "restore completed" })))
}
