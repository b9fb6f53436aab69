use anyhow::Context;
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backup::dto::RestoreDocument;
use crate::records::repo::WeightRecord;
use crate::settings::repo::UserSettings;

/// Serialize the user's settings and records into one `{settings, records}`
/// document, append it to the backups table, and return it verbatim.
pub async fn snapshot(db: &SqlitePool, user_id: &str) -> anyhow::Result<String> {
    let settings = UserSettings::find_by_user(db, user_id).await?;
    let records = WeightRecord::list_ordered_by_date(db, user_id).await?;

    let settings_value = match settings {
        Some(settings) => serde_json::to_value(settings)?,
        None => serde_json::json!({}),
    };
    let payload = serde_json::to_string(&serde_json::json!({
        "settings": settings_value,
        "records": records,
    }))?;

    sqlx::query("INSERT INTO backups (id, user_id, backup_data) VALUES (?, ?, ?)")
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(&payload)
        .execute(db)
        .await?;

    Ok(payload)
}

/// Replace the user's settings and records from a backup document inside one
/// transaction. Any failure rolls back every change from this call.
pub async fn restore(db: &SqlitePool, user_id: &str, raw: &str) -> anyhow::Result<()> {
    let document: RestoreDocument =
        serde_json::from_str(raw).context("invalid backup document")?;

    let mut tx = db.begin().await?;

    if let Some(settings) = document.settings {
        sqlx::query(
            r#"
            REPLACE INTO user_settings (
                id, user_id, height, gender, initial_weight, target_weight,
                target_months, reminder_enabled, reminder_time
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(settings.id.unwrap_or_else(|| Uuid::new_v4().to_string()))
        .bind(user_id)
        .bind(settings.height)
        .bind(settings.gender)
        .bind(settings.initial_weight)
        .bind(settings.target_weight)
        .bind(settings.target_months)
        .bind(truthy(settings.reminder_enabled.as_ref()))
        .bind(settings.reminder_time)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(records) = document.records.filter(|r| !r.is_empty()) {
        for record in records {
            sqlx::query(
                r#"
                REPLACE INTO weight_records (id, user_id, date, weight, feeling, notes)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.id.unwrap_or_else(|| Uuid::new_v4().to_string()))
            .bind(user_id)
            .bind(record.date)
            .bind(record.weight)
            .bind(record.feeling)
            .bind(record.notes)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

fn truthy(value: Option<&Value>) -> i64 {
    let on = match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    };
    if on {
        1
    } else {
        0
    }
}
