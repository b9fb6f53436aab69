use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::settings::dto::SettingsPayload;
use crate::settings::repo::UserSettings;
use crate::state::AppState;

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(put_settings))
}

#[instrument(skip(state, user))]
pub async fn get_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let body = match UserSettings::find_by_user(&state.db, &user.id).await? {
        Some(settings) => serde_json::to_value(settings)?,
        None => json!({}),
    };
    Ok(Json(body))
}

#[instrument(skip(state, user, payload))]
pub async fn put_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<Value>, ApiError> {
    let message = if UserSettings::find_by_user(&state.db, &user.id)
        .await?
        .is_some()
    {
        UserSettings::update_from(&state.db, &user.id, &payload).await?;
        "settings updated"
    } else {
        UserSettings::insert_from(&state.db, &Uuid::new_v4().to_string(), &user.id, &payload)
            .await?;
        "settings created"
    };

    info!(user_id = %user.id, "settings saved");
    Ok(Json(json!({ "message": message })))
}
