//! Role assignments

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tilawah_core::{error::Result, Role, TilawahError, UserId};

/// Roles held by a user
pub async fn roles_of(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Role>> {
    let rows = sqlx::query("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let role: String = row.try_get("role")?;
            Role::from_str(&role)
                .ok_or_else(|| TilawahError::Database(format!("unknown role '{role}'")))
        })
        .collect()
}

/// Whether a user holds a role
pub async fn has_role(pool: &SqlitePool, user_id: &UserId, role: Role) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM user_roles WHERE user_id = ? AND role = ?")
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}

/// Replace all of a user's roles with a single role
pub async fn replace_role(pool: &SqlitePool, user_id: &UserId, role: Role) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO user_roles (user_id, role, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(role.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Number of users holding a role
pub async fn count_by_role(pool: &SqlitePool, role: Role) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM user_roles WHERE role = ?")
        .bind(role.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.try_get("count")?)
}
