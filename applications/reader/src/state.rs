/// Shared application state
use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tilawah_content_client::{AlQuranCloudClient, QuranComClient};
use tilawah_core::Session;
use tilawah_storage::{accounts, admin, roles, LocalAccountStore};
use tracing::info;

/// Email and password given on the command line or in the environment
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_args(email: Option<String>, password: Option<String>) -> Option<Self> {
        match (email, password) {
            (Some(email), Some(password)) => Some(Self { email, password }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Clients and settings shared by every command
#[derive(Clone)]
pub struct AppState {
    pub config: ReaderConfig,
    pub content: Arc<QuranComClient>,
    pub audio: Arc<AlQuranCloudClient>,
    credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(config: ReaderConfig, credentials: Option<Credentials>) -> Result<Self> {
        let content_config = config.content_config();
        let content = Arc::new(QuranComClient::new(&content_config)?);
        let audio = Arc::new(AlQuranCloudClient::new(&content_config)?);

        Ok(Self {
            config,
            content,
            audio,
            credentials,
        })
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Open the account database, applying migrations
    pub async fn pool(&self) -> Result<SqlitePool> {
        let pool = tilawah_storage::create_pool(&self.config.storage.database_url).await?;
        tilawah_storage::run_migrations(&pool).await?;
        Ok(pool)
    }

    /// Sign in with the configured credentials
    pub async fn sign_in(&self) -> Result<(SqlitePool, Session)> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ReaderError::MissingCredentials)?;

        let pool = self.pool().await?;
        let mut session =
            accounts::sign_in(&pool, &credentials.email, &credentials.password).await?;

        // Only while no admin exists, so a later demotion sticks
        if self.config.is_admin_email(&session.email)
            && admin::bootstrap_admin(&pool, &session.user_id).await?
        {
            session.roles = roles::roles_of(&pool, &session.user_id).await?;
            info!(user_id = %session.user_id, "Granted admin role to configured admin account");
        }

        Ok((pool, session))
    }

    /// Sign in if credentials were given; anonymous otherwise
    pub async fn optional_session(&self) -> Result<Option<(SqlitePool, Session)>> {
        if self.credentials.is_none() {
            return Ok(None);
        }
        self.sign_in().await.map(Some)
    }

    /// Session-scoped account store for the signed-in user
    pub async fn account_store(&self) -> Result<(LocalAccountStore, Session)> {
        let (pool, session) = self.sign_in().await?;
        Ok((LocalAccountStore::for_session(pool, &session), session))
    }
}
