//! Personal verse notes

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tilawah_core::types::generate_record_id;
use tilawah_core::{error::Result, NewNote, Note, TilawahError, UserId, VerseRef};

fn from_row(row: &SqliteRow) -> std::result::Result<Note, sqlx::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        surah_number: row.try_get("surah_number")?,
        verse_number: row.try_get("verse_number")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn require_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(TilawahError::invalid_input("Note cannot be empty"));
    }
    Ok(())
}

/// Add a note to a verse
pub async fn add(pool: &SqlitePool, user_id: &UserId, note: NewNote) -> Result<Note> {
    require_content(&note.content)?;

    let now = Utc::now();
    let created = Note {
        id: generate_record_id(),
        user_id: user_id.clone(),
        surah_number: note.verse.chapter(),
        verse_number: note.verse.verse(),
        content: note.content,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO notes (id, user_id, surah_number, verse_number, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&created.id)
    .bind(&created.user_id)
    .bind(created.surah_number)
    .bind(created.verse_number)
    .bind(&created.content)
    .bind(created.created_at)
    .bind(created.updated_at)
    .execute(pool)
    .await?;

    Ok(created)
}

/// Get one of the user's notes
pub async fn get(pool: &SqlitePool, user_id: &UserId, id: &str) -> Result<Option<Note>> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, surah_number, verse_number, content, created_at, updated_at
        FROM notes
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

/// Replace a note's content and bump `updated_at`
///
/// # Errors
/// `NotFound` if no note with this id belongs to the user
pub async fn update(pool: &SqlitePool, user_id: &UserId, id: &str, content: &str) -> Result<Note> {
    require_content(content)?;

    let result = sqlx::query("UPDATE notes SET content = ?, updated_at = ? WHERE id = ? AND user_id = ?")
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TilawahError::not_found("Note", id));
    }

    get(pool, user_id, id)
        .await?
        .ok_or_else(|| TilawahError::not_found("Note", id))
}

/// Delete one of the user's notes
pub async fn delete(pool: &SqlitePool, user_id: &UserId, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TilawahError::not_found("Note", id));
    }
    Ok(())
}

/// The user's notes, newest first
pub async fn list(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Note>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, surah_number, verse_number, content, created_at, updated_at
        FROM notes
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// The user's notes on one verse, newest first
pub async fn list_for_verse(pool: &SqlitePool, user_id: &UserId, verse: VerseRef) -> Result<Vec<Note>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, surah_number, verse_number, content, created_at, updated_at
        FROM notes
        WHERE user_id = ? AND surah_number = ? AND verse_number = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .bind(verse.chapter())
    .bind(verse.verse())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Total notes across all users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM notes")
        .fetch_one(pool)
        .await?;

    Ok(row.try_get("count")?)
}
