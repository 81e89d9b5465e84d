use crate::{bookmarks, notes, profiles, reading_progress};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tilawah_core::{
    error::Result,
    storage::{AccountStore, ProgressStore},
    types::*,
    TilawahError,
};

/// Account store for one signed-in user, backed by `SQLite`
///
/// Every query is filtered by the session's user id.
#[derive(Clone)]
pub struct LocalAccountStore {
    pool: SqlitePool,
    user_id: UserId,
}

impl LocalAccountStore {
    pub fn new(pool: SqlitePool, user_id: UserId) -> Self {
        Self { pool, user_id }
    }

    /// Store scoped to a session's user
    pub fn for_session(pool: SqlitePool, session: &Session) -> Self {
        Self::new(pool, session.user_id.clone())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ProgressStore for LocalAccountStore {
    async fn upsert_progress(&self, progress: &ReadingProgress) -> Result<()> {
        if progress.user_id != self.user_id {
            return Err(TilawahError::PermissionDeniedWithContext(
                "cannot write another user's progress".to_string(),
            ));
        }
        reading_progress::upsert(&self.pool, progress).await
    }

    async fn get_progress(&self, user_id: &UserId) -> Result<Option<ReadingProgress>> {
        if user_id != &self.user_id {
            return Err(TilawahError::PermissionDenied);
        }
        reading_progress::get(&self.pool, user_id).await
    }
}

#[async_trait]
impl AccountStore for LocalAccountStore {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    // Bookmarks
    async fn add_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        bookmarks::add(&self.pool, &self.user_id, bookmark).await
    }

    async fn remove_bookmark(&self, id: &str) -> Result<()> {
        bookmarks::remove(&self.pool, &self.user_id, id).await
    }

    async fn get_bookmarks(&self) -> Result<Vec<Bookmark>> {
        bookmarks::list(&self.pool, &self.user_id).await
    }

    async fn is_bookmarked(&self, verse: VerseRef) -> Result<bool> {
        bookmarks::is_bookmarked(&self.pool, &self.user_id, verse).await
    }

    // Notes
    async fn add_note(&self, note: NewNote) -> Result<Note> {
        notes::add(&self.pool, &self.user_id, note).await
    }

    async fn update_note(&self, id: &str, content: &str) -> Result<Note> {
        notes::update(&self.pool, &self.user_id, id, content).await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        notes::delete(&self.pool, &self.user_id, id).await
    }

    async fn get_notes(&self) -> Result<Vec<Note>> {
        notes::list(&self.pool, &self.user_id).await
    }

    async fn get_verse_notes(&self, verse: VerseRef) -> Result<Vec<Note>> {
        notes::list_for_verse(&self.pool, &self.user_id, verse).await
    }

    // Profile
    async fn get_profile(&self) -> Result<Option<Profile>> {
        profiles::get(&self.pool, &self.user_id).await
    }

    async fn update_profile(&self, update: UpdateProfile) -> Result<Profile> {
        profiles::update(&self.pool, &self.user_id, update).await
    }
}
