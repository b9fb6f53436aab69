use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::settings::dto::SettingsPayload;

/// One row per user. `reminder_enabled` stays 0/1 on the wire, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSettings {
    pub id: String,
    pub user_id: String,
    pub height: f64,
    pub gender: String,
    pub initial_weight: f64,
    pub target_weight: f64,
    pub target_months: i64,
    pub reminder_enabled: i64,
    pub reminder_time: String,
    pub updated_at: String,
}

impl UserSettings {
    pub async fn find_by_user(db: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UserSettings>> {
        let settings = sqlx::query_as::<_, UserSettings>(
            r#"
            SELECT id, user_id, height, gender, initial_weight, target_weight,
                   target_months, reminder_enabled, reminder_time, updated_at
            FROM user_settings
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(settings)
    }

    /// Insert a row carrying only the column defaults.
    pub async fn insert_defaults(db: &SqlitePool, id: &str, user_id: &str) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO user_settings (id, user_id) VALUES (?, ?)")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn insert_from(
        db: &SqlitePool,
        id: &str,
        user_id: &str,
        payload: &SettingsPayload,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (
                id, user_id, height, gender, initial_weight, target_weight,
                target_months, reminder_enabled, reminder_time
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(payload.height)
        .bind(payload.gender.as_deref())
        .bind(payload.initial_weight)
        .bind(payload.target_weight)
        .bind(payload.target_months)
        .bind(reminder_flag(payload))
        .bind(payload.reminder_time.as_deref())
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn update_from(
        db: &SqlitePool,
        user_id: &str,
        payload: &SettingsPayload,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            UPDATE user_settings SET
                height = ?, gender = ?, initial_weight = ?, target_weight = ?,
                target_months = ?, reminder_enabled = ?, reminder_time = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = ?
            "#,
        )
        .bind(payload.height)
        .bind(payload.gender.as_deref())
        .bind(payload.initial_weight)
        .bind(payload.target_weight)
        .bind(payload.target_months)
        .bind(reminder_flag(payload))
        .bind(payload.reminder_time.as_deref())
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }
}

fn reminder_flag(payload: &SettingsPayload) -> i64 {
    if payload.reminder_enabled.unwrap_or(false) {
        1
    } else {
        0
    }
}
