//! Tilawah Storage
//!
//! Multi-user `SQLite` account store for Tilawah.
//!
//! This crate persists everything that belongs to a reader: accounts,
//! profiles, roles, bookmarks, notes, reading progress and the admin
//! activity log.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//! - **Row-level Authorization**: [`LocalAccountStore`] filters every query by
//!   the signed-in user; admin operations require an [`AdminContext`]
//! - **Embedded Migrations**: The schema ships inside the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use tilawah_storage::{accounts, create_pool, run_migrations, LocalAccountStore};
//! use tilawah_core::storage::AccountStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tilawah.db").await?;
//! run_migrations(&pool).await?;
//!
//! let session = accounts::sign_in(&pool, "reader@example.com", "secret1").await?;
//! let store = LocalAccountStore::for_session(pool, &session);
//!
//! let bookmarks = store.get_bookmarks().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod accounts;
pub mod bookmarks;
pub mod notes;
pub mod profiles;
pub mod reading_progress;
pub mod roles;

// Administration
pub mod activity_logs;
pub mod admin;

pub use admin::AdminContext;
pub use context::LocalAccountStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any slice is used.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> error::Result<()> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tilawah.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> error::Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    debug!("SQLite pool created");
    Ok(pool)
}
