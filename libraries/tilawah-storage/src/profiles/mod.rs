//! User profiles

use crate::error::is_unique_violation;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tilawah_core::{error::Result, Profile, TilawahError, UpdateProfile, UserId};

const COLUMNS: &str =
    "user_id, username, full_name, avatar_url, is_verified, is_banned, ban_reason, created_at";

pub(crate) fn from_row(row: &SqliteRow) -> std::result::Result<Profile, sqlx::Error> {
    Ok(Profile {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        full_name: row.try_get("full_name")?,
        avatar_url: row.try_get("avatar_url")?,
        is_verified: row.try_get("is_verified")?,
        is_banned: row.try_get("is_banned")?,
        ban_reason: row.try_get("ban_reason")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Get a user's profile
pub async fn get(pool: &SqlitePool, user_id: &UserId) -> Result<Option<Profile>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM profiles WHERE user_id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All profiles, newest account first
pub async fn list(pool: &SqlitePool) -> Result<Vec<Profile>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Update username, full name and avatar (only provided fields change)
///
/// # Errors
/// `Duplicate` if the username is taken, `NotFound` if the user has no profile
pub async fn update(pool: &SqlitePool, user_id: &UserId, update: UpdateProfile) -> Result<Profile> {
    if let Some(username) = &update.username {
        if username.trim().is_empty() {
            return Err(TilawahError::invalid_input("Username cannot be empty"));
        }
    }

    let result = sqlx::query(
        r#"
        UPDATE profiles SET
            username = COALESCE(?, username),
            full_name = COALESCE(?, full_name),
            avatar_url = COALESCE(?, avatar_url),
            updated_at = ?
        WHERE user_id = ?
        "#,
    )
    .bind(update.username.as_deref().map(str::trim))
    .bind(&update.full_name)
    .bind(&update.avatar_url)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            return Err(TilawahError::not_found("Profile", user_id.as_str()));
        }
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(TilawahError::Duplicate("Username is already taken".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    get(pool, user_id)
        .await?
        .ok_or_else(|| TilawahError::not_found("Profile", user_id.as_str()))
}

/// Ban or unban a user
pub async fn set_banned(
    pool: &SqlitePool,
    user_id: &UserId,
    banned: bool,
    reason: Option<&str>,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE profiles SET is_banned = ?, ban_reason = ?, updated_at = ? WHERE user_id = ?",
    )
    .bind(banned)
    .bind(if banned { reason } else { None })
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(TilawahError::UserNotFound(user_id.clone()));
    }
    Ok(())
}

/// Number of profiles, optionally only banned ones
pub async fn count(pool: &SqlitePool, banned_only: bool) -> Result<i64> {
    let sql = if banned_only {
        "SELECT COUNT(*) AS count FROM profiles WHERE is_banned = 1"
    } else {
        "SELECT COUNT(*) AS count FROM profiles"
    };
    let row = sqlx::query(sql).fetch_one(pool).await?;

    Ok(row.try_get("count")?)
}
