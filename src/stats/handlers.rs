use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::records::repo::WeightRecord;
use crate::settings::repo::UserSettings;
use crate::state::AppState;
use crate::stats::compute::{compute, StatsSummary};

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

#[instrument(skip(state, user))]
pub async fn get_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<StatsSummary>, ApiError> {
    let settings = UserSettings::find_by_user(&state.db, &user.id)
        .await?
        .ok_or_else(|| ApiError::Internal("settings not found".into()))?;
    let records = WeightRecord::list_ordered_by_date(&state.db, &user.id).await?;
    Ok(Json(compute(&settings, &records)))
}
