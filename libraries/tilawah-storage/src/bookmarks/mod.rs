//! Verse bookmarks

use crate::error::is_unique_violation;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tilawah_core::types::generate_record_id;
use tilawah_core::{error::Result, Bookmark, NewBookmark, TilawahError, UserId, VerseRef};

fn from_row(row: &SqliteRow) -> std::result::Result<Bookmark, sqlx::Error> {
    Ok(Bookmark {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        surah_number: row.try_get("surah_number")?,
        verse_number: row.try_get("verse_number")?,
        surah_name: row.try_get("surah_name")?,
        verse_text: row.try_get("verse_text")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Bookmark a verse
///
/// # Errors
/// `Duplicate` if the user already bookmarked this verse
pub async fn add(pool: &SqlitePool, user_id: &UserId, bookmark: NewBookmark) -> Result<Bookmark> {
    let created = Bookmark {
        id: generate_record_id(),
        user_id: user_id.clone(),
        surah_number: bookmark.verse.chapter(),
        verse_number: bookmark.verse.verse(),
        surah_name: bookmark.surah_name,
        verse_text: bookmark.verse_text,
        created_at: Utc::now(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO bookmarks (id, user_id, surah_number, verse_number, surah_name, verse_text, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&created.id)
    .bind(&created.user_id)
    .bind(created.surah_number)
    .bind(created.verse_number)
    .bind(&created.surah_name)
    .bind(&created.verse_text)
    .bind(created.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(created),
        Err(e) if is_unique_violation(&e) => Err(TilawahError::Duplicate(format!(
            "verse {} is already bookmarked",
            bookmark.verse
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Remove one of the user's bookmarks
///
/// # Errors
/// `NotFound` if no bookmark with this id belongs to the user
pub async fn remove(pool: &SqlitePool, user_id: &UserId, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TilawahError::not_found("Bookmark", id));
    }
    Ok(())
}

/// The user's bookmarks, newest first
pub async fn list(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Bookmark>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, surah_number, verse_number, surah_name, verse_text, created_at
        FROM bookmarks
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Whether the user bookmarked a verse
pub async fn is_bookmarked(pool: &SqlitePool, user_id: &UserId, verse: VerseRef) -> Result<bool> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count FROM bookmarks
        WHERE user_id = ? AND surah_number = ? AND verse_number = ?
        "#,
    )
    .bind(user_id)
    .bind(verse.chapter())
    .bind(verse.verse())
    .fetch_one(pool)
    .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}

/// Total bookmarks across all users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM bookmarks")
        .fetch_one(pool)
        .await?;

    Ok(row.try_get("count")?)
}
