//! Activity log (audit trail)

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tilawah_core::types::generate_record_id;
use tilawah_core::{error::Result, ActivityLog, UserId};
use tracing::debug;

/// Entries returned when no limit is given
pub const DEFAULT_LIMIT: i64 = 50;

/// Record an action
pub async fn log(
    pool: &SqlitePool,
    user_id: Option<&UserId>,
    action: &str,
    details: Option<serde_json::Value>,
) -> Result<ActivityLog> {
    let entry = ActivityLog {
        id: generate_record_id(),
        user_id: user_id.cloned(),
        action: action.to_string(),
        details,
        created_at: Utc::now(),
    };

    let details_json = entry
        .details
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    sqlx::query(
        "INSERT INTO activity_logs (id, user_id, action, details, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&entry.id)
    .bind(&entry.user_id)
    .bind(&entry.action)
    .bind(details_json)
    .bind(entry.created_at)
    .execute(pool)
    .await?;

    debug!(action, "Activity logged");
    Ok(entry)
}

/// Most recent entries, newest first
pub async fn recent(pool: &SqlitePool, limit: Option<i64>) -> Result<Vec<ActivityLog>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, action, details, created_at
        FROM activity_logs
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(limit.unwrap_or(DEFAULT_LIMIT).max(0))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ActivityLog> {
            let details: Option<String> = row.try_get("details")?;
            Ok(ActivityLog {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                action: row.try_get("action")?,
                details: details.as_deref().map(serde_json::from_str).transpose()?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}
