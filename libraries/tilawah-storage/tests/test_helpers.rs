//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so every pooled connection sees the same migrated schema.

#![allow(dead_code)]

use chrono::Utc;
use sqlx::SqlitePool;
use tilawah_core::{Role, Session, UserId};
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = tilawah_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        tilawah_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create an account without going through bcrypt
///
/// The password hash is a placeholder, so these users cannot sign in.
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> Session {
    let user_id = UserId::generate();
    let now = Utc::now();

    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, 'x', ?)")
        .bind(&user_id)
        .bind(email)
        .bind(now)
        .execute(pool)
        .await
        .expect("Failed to create test user");

    sqlx::query(
        "INSERT INTO profiles (user_id, full_name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&user_id)
    .bind(email.split('@').next().unwrap_or(email))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test profile");

    tilawah_storage::roles::replace_role(pool, &user_id, Role::User)
        .await
        .expect("Failed to assign role");

    Session {
        user_id,
        email: email.to_string(),
        roles: vec![Role::User],
    }
}

/// Test fixture: Create an account holding the admin role
pub async fn create_test_admin(pool: &SqlitePool, email: &str) -> Session {
    let mut session = create_test_user(pool, email).await;

    tilawah_storage::roles::replace_role(pool, &session.user_id, Role::Admin)
        .await
        .expect("Failed to grant admin");

    session.roles = vec![Role::Admin];
    session
}
