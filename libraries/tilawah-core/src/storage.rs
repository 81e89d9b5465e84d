//! Account storage traits
//!
//! The account collaborator is a keyed store scoped to one signed-in user:
//! insert, update, delete, upsert-by-user, and select ordered by recency.

use crate::error::Result;
use crate::types::{
    Bookmark, NewBookmark, NewNote, Note, Profile, ReadingProgress, UpdateProfile, UserId,
    VerseRef,
};
use async_trait::async_trait;

/// Reading-progress persistence (one row per user)
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Insert or overwrite the user's progress row
    async fn upsert_progress(&self, progress: &ReadingProgress) -> Result<()>;

    /// Get a user's progress, if any was recorded
    async fn get_progress(&self, user_id: &UserId) -> Result<Option<ReadingProgress>>;
}

/// Session-scoped account operations
///
/// Every call acts on behalf of `user_id()`; rows owned by other users are
/// invisible and cannot be modified.
#[async_trait]
pub trait AccountStore: ProgressStore {
    /// The user this store acts for
    fn user_id(&self) -> UserId;

    // ========================================================================
    // Bookmarks
    // ========================================================================

    /// Bookmark a verse
    async fn add_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark>;

    /// Remove a bookmark by ID
    async fn remove_bookmark(&self, id: &str) -> Result<()>;

    /// All bookmarks, newest first
    async fn get_bookmarks(&self) -> Result<Vec<Bookmark>>;

    /// Whether a verse is bookmarked
    async fn is_bookmarked(&self, verse: VerseRef) -> Result<bool>;

    // ========================================================================
    // Notes
    // ========================================================================

    /// Add a note to a verse
    async fn add_note(&self, note: NewNote) -> Result<Note>;

    /// Replace a note's content
    async fn update_note(&self, id: &str, content: &str) -> Result<Note>;

    /// Delete a note
    async fn delete_note(&self, id: &str) -> Result<()>;

    /// All notes, newest first
    async fn get_notes(&self) -> Result<Vec<Note>>;

    /// Notes attached to one verse, newest first
    async fn get_verse_notes(&self, verse: VerseRef) -> Result<Vec<Note>>;

    // ========================================================================
    // Reading progress
    // ========================================================================

    /// The current user's progress
    async fn reading_progress(&self) -> Result<Option<ReadingProgress>> {
        self.get_progress(&self.user_id()).await
    }

    // ========================================================================
    // Profile
    // ========================================================================

    /// The current user's profile
    async fn get_profile(&self) -> Result<Option<Profile>>;

    /// Update the current user's profile
    async fn update_profile(&self, update: UpdateProfile) -> Result<Profile>;
}
