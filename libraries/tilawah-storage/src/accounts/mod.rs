//! Account registration and sign-in

use crate::error::{is_unique_violation, StorageError};
use crate::{activity_logs, roles};
use chrono::Utc;
use serde_json::json;
use sqlx::{Row, SqlitePool};
use tilawah_core::validation::{validate_registration, validate_sign_in};
use tilawah_core::{error::Result, Role, Session, TilawahError, UserId};
use tracing::{info, warn};

/// Normalize an email for storage and lookup
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create an account with its profile and the `user` role
///
/// # Errors
/// `InvalidInput` for a malformed form, `Duplicate` if the email is taken
pub async fn register(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Session> {
    validate_registration(full_name, email, password, password)?;

    let email = normalize_email(email);
    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| TilawahError::Other(format!("hashing task failed: {e}")))?
        .map_err(StorageError::from)?;

    let user_id = UserId::generate();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(&email)
    .bind(&hash)
    .bind(now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
        if is_unique_violation(&e) {
            return Err(TilawahError::Duplicate(format!(
                "An account with email {email} already exists"
            )));
        }
        return Err(e.into());
    }

    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, full_name, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(full_name.trim())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_roles (user_id, role, created_at) VALUES (?, ?, ?)")
        .bind(&user_id)
        .bind(Role::User.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    activity_logs::log(pool, Some(&user_id), "user_registered", Some(json!({ "email": email })))
        .await?;
    info!(user_id = %user_id, "Account registered");

    Ok(Session {
        user_id,
        email,
        roles: vec![Role::User],
    })
}

/// Verify credentials and open a session
///
/// # Errors
/// `AuthFailed` for unknown email or wrong password, `PermissionDenied` if banned
pub async fn sign_in(pool: &SqlitePool, email: &str, password: &str) -> Result<Session> {
    validate_sign_in(email, password)?;
    let email = normalize_email(email);

    let row = sqlx::query(
        r#"
        SELECT u.id, u.password_hash, COALESCE(p.is_banned, 0) AS is_banned, p.ban_reason
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.id
        WHERE u.email = ?
        "#,
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        warn!("Sign-in for unknown email");
        return Err(invalid_credentials());
    };

    let user_id: UserId = row.try_get("id")?;
    let hash: String = row.try_get("password_hash")?;

    let password = password.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| TilawahError::Other(format!("hashing task failed: {e}")))?
        .map_err(StorageError::from)?;

    if !verified {
        warn!(user_id = %user_id, "Sign-in with wrong password");
        return Err(invalid_credentials());
    }

    if row.try_get::<bool, _>("is_banned")? {
        let reason: Option<String> = row.try_get("ban_reason")?;
        warn!(user_id = %user_id, "Banned user attempted sign-in");
        return Err(TilawahError::PermissionDeniedWithContext(match reason {
            Some(reason) => format!("account is banned: {reason}"),
            None => "account is banned".to_string(),
        }));
    }

    sqlx::query("UPDATE users SET last_sign_in_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(&user_id)
        .execute(pool)
        .await?;

    let roles = roles::roles_of(pool, &user_id).await?;
    info!(user_id = %user_id, "Signed in");

    Ok(Session {
        user_id,
        email,
        roles,
    })
}

/// Look up a user's id by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserId>> {
    let row = sqlx::query("SELECT id FROM users WHERE email = ?")
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.try_get("id")).transpose()?)
}

/// Whether an account exists
pub async fn exists(pool: &SqlitePool, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}

fn invalid_credentials() -> TilawahError {
    TilawahError::AuthFailed("Invalid email or password".to_string())
}
