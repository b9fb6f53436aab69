use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::records::dto::{RecordQuery, UpsertRecordRequest};
use crate::records::repo::{SortOrder, WeightRecord};
use crate::state::AppState;

pub fn records_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records).post(upsert_record))
        .route("/records/:date", get(get_record).delete(delete_record))
}

#[instrument(skip(state, user))]
pub async fn list_records(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<WeightRecord>>, ApiError> {
    let records = WeightRecord::list_for_user(
        &state.db,
        &user.id,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        SortOrder::from_query(query.sort.as_deref()),
    )
    .await?;
    Ok(Json(records))
}

#[instrument(skip(state, user))]
pub async fn get_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(date): Path<String>,
) -> Result<Json<Option<WeightRecord>>, ApiError> {
    let record = WeightRecord::find_by_date(&state.db, &user.id, &date).await?;
    Ok(Json(record))
}

/// The date is the record's identity: an existing (user, date) row is updated
/// in place, anything else is inserted fresh.
#[instrument(skip(state, user, payload))]
pub async fn upsert_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpsertRecordRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let date = payload
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("date and weight are required".into()))?;
    let weight = payload
        .weight
        .ok_or_else(|| ApiError::Validation("date and weight are required".into()))?;

    match WeightRecord::find_by_date(&state.db, &user.id, &date).await? {
        Some(existing) => {
            WeightRecord::update(
                &state.db,
                &existing.id,
                weight,
                payload.feeling.as_deref(),
                payload.notes.as_deref(),
            )
            .await?;
            info!(user_id = %user.id, %date, "record updated");
            Ok((StatusCode::OK, Json(json!({ "message": "record updated" }))))
        }
        None => {
            WeightRecord::insert(
                &state.db,
                &Uuid::new_v4().to_string(),
                &user.id,
                &date,
                weight,
                payload.feeling.as_deref(),
                payload.notes.as_deref(),
            )
            .await?;
            info!(user_id = %user.id, %date, "record created");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "record created" })),
            ))
        }
    }
}

#[instrument(skip(state, user))]
pub async fn delete_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(date): Path<String>,
) -> Result<Json<Value>, ApiError> {
    WeightRecord::delete_by_date(&state.db, &user.id, &date).await?;
    info!(user_id = %user.id, %date, "record deleted");
    Ok(Json(json!({ "message": "record deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;

    async fn seed_user(state: &AppState, id: &str) -> User {
        User::create(&state.db, id, &format!("user-{id}"), "hash", None)
            .await
            .expect("create user");
        User::find_by_id(&state.db, id)
            .await
            .expect("query user")
            .expect("user row")
    }

    fn upsert_payload(date: &str, weight: f64) -> UpsertRecordRequest {
        UpsertRecordRequest {
            date: Some(date.into()),
            weight: Some(weight),
            feeling: Some("good".into()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_row() {
        let state = AppState::test().await;
        let user = seed_user(&state, "u-h-1").await;

        let (status, _) = upsert_record(
            State(state.clone()),
            CurrentUser(user.clone()),
            Json(upsert_payload("2024-03-01", 181.0)),
        )
        .await
        .expect("first upsert");
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = upsert_record(
            State(state.clone()),
            CurrentUser(user.clone()),
            Json(upsert_payload("2024-03-01", 180.2)),
        )
        .await
        .expect("second upsert");
        assert_eq!(status, StatusCode::OK);

        let rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM weight_records WHERE user_id = ? AND date = ?")
                .bind(&user.id)
                .bind("2024-03-01")
                .fetch_one(&state.db)
                .await
                .expect("count");
        assert_eq!(rows, 1);

        let record = WeightRecord::find_by_date(&state.db, &user.id, "2024-03-01")
            .await
            .expect("find")
            .expect("record");
        assert_eq!(record.weight, 180.2);
    }

    #[tokio::test]
    async fn upsert_requires_date_and_weight() {
        let state = AppState::test().await;
        let user = seed_user(&state, "u-h-2").await;

        let err = upsert_record(
            State(state.clone()),
            CurrentUser(user.clone()),
            Json(UpsertRecordRequest {
                date: Some("2024-03-01".into()),
                weight: None,
                feeling: None,
                notes: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = upsert_record(
            State(state),
            CurrentUser(user),
            Json(UpsertRecordRequest {
                date: Some("  ".into()),
                weight: Some(180.0),
                feeling: None,
                notes: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn get_returns_null_for_missing_date() {
        let state = AppState::test().await;
        let user = seed_user(&state, "u-h-3").await;

        let Json(record) = get_record(
            State(state),
            CurrentUser(user),
            Path("2024-03-01".to_string()),
        )
        .await
        .expect("get record");
        assert!(record.is_none());
    }
}
