//! Reading progress (one row per user)

use sqlx::{Row, SqlitePool};
use tilawah_core::{error::Result, ReadingProgress, UserId};

/// Insert or overwrite the user's progress
pub async fn upsert(pool: &SqlitePool, progress: &ReadingProgress) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reading_progress (user_id, current_surah, current_verse, completion_percentage, last_read_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            current_surah = excluded.current_surah,
            current_verse = excluded.current_verse,
            completion_percentage = excluded.completion_percentage,
            last_read_at = excluded.last_read_at
        "#,
    )
    .bind(&progress.user_id)
    .bind(progress.current_surah)
    .bind(progress.current_verse)
    .bind(progress.completion_percentage)
    .bind(progress.last_read_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the user's progress
pub async fn get(pool: &SqlitePool, user_id: &UserId) -> Result<Option<ReadingProgress>> {
    let row = sqlx::query(
        r#"
        SELECT user_id, current_surah, current_verse, completion_percentage, last_read_at
        FROM reading_progress
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(ReadingProgress {
        user_id: row.try_get("user_id")?,
        current_surah: row.try_get("current_surah")?,
        current_verse: row.try_get("current_verse")?,
        completion_percentage: row.try_get("completion_percentage")?,
        last_read_at: row.try_get("last_read_at")?,
    }))
}
