use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeightRecord {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub weight: f64,
    pub feeling: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    DateAsc,
    DateDesc,
    WeightAsc,
    WeightDesc,
}

impl SortOrder {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("date_asc") => SortOrder::DateAsc,
            Some("weight_asc") => SortOrder::WeightAsc,
            Some("weight_desc") => SortOrder::WeightDesc,
            _ => SortOrder::DateDesc,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            SortOrder::DateAsc => " ORDER BY date ASC",
            SortOrder::DateDesc => " ORDER BY date DESC",
            SortOrder::WeightAsc => " ORDER BY weight ASC",
            SortOrder::WeightDesc => " ORDER BY weight DESC",
        }
    }
}

const COLUMNS: &str = "id, user_id, date, weight, feeling, notes, created_at, updated_at";

impl WeightRecord {
    /// Range-filtered listing; both bounds are inclusive and optional.
    pub async fn list_for_user(
        db: &SqlitePool,
        user_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        sort: SortOrder,
    ) -> sqlx::Result<Vec<WeightRecord>> {
        let mut sql = format!("SELECT {COLUMNS} FROM weight_records WHERE user_id = ?");
        match (start_date, end_date) {
            (Some(_), Some(_)) => sql.push_str(" AND date BETWEEN ? AND ?"),
            (Some(_), None) => sql.push_str(" AND date >= ?"),
            (None, Some(_)) => sql.push_str(" AND date <= ?"),
            (None, None) => {}
        }
        sql.push_str(sort.order_clause());

        let mut query = sqlx::query_as::<_, WeightRecord>(&sql).bind(user_id);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        query.fetch_all(db).await
    }

    /// All of a user's records in chronological order, for statistics and
    /// backup snapshots.
    pub async fn list_ordered_by_date(
        db: &SqlitePool,
        user_id: &str,
    ) -> sqlx::Result<Vec<WeightRecord>> {
        sqlx::query_as::<_, WeightRecord>(&format!(
            "SELECT {COLUMNS} FROM weight_records WHERE user_id = ? ORDER BY date"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_date(
        db: &SqlitePool,
        user_id: &str,
        date: &str,
    ) -> sqlx::Result<Option<WeightRecord>> {
        sqlx::query_as::<_, WeightRecord>(&format!(
            "SELECT {COLUMNS} FROM weight_records WHERE user_id = ? AND date = ?"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &SqlitePool,
        id: &str,
        user_id: &str,
        date: &str,
        weight: f64,
        feeling: Option<&str>,
        notes: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO weight_records (id, user_id, date, weight, feeling, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(date)
        .bind(weight)
        .bind(feeling)
        .bind(notes)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Update the mutable fields of an existing record in place.
    pub async fn update(
        db: &SqlitePool,
        id: &str,
        weight: f64,
        feeling: Option<&str>,
        notes: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            UPDATE weight_records SET
                weight = ?, feeling = ?, notes = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(weight)
        .bind(feeling)
        .bind(notes)
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Idempotent: deleting an absent date is not an error.
    pub async fn delete_by_date(db: &SqlitePool, user_id: &str, date: &str) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM weight_records WHERE user_id = ? AND date = ?")
            .bind(user_id)
            .bind(date)
            .execute(db)
            .await?;
        Ok(())
    }
}
