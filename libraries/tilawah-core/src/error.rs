/// Core error types for Tilawah
use thiserror::Error;

use crate::types::UserId;

/// Result type alias using `TilawahError`
pub type Result<T> = std::result::Result<T, TilawahError>;

/// Core error type for Tilawah
#[derive(Error, Debug)]
pub enum TilawahError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audio resolution/playback errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Chapter number outside 1..=114
    #[error("Chapter not found: {0}")]
    ChapterNotFound(u32),

    /// Verse reference that does not address a verse
    #[error("Invalid verse reference: {0}")]
    InvalidVerse(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// No signed-in session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Wrong email or password
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Permission denied
    #[error("Permission denied")]
    PermissionDenied,

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDeniedWithContext(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TilawahError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDeniedWithContext(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this failure should be shown to the user as a notice.
    ///
    /// Network failures degrade silently (logged only); validation and
    /// authorization failures carry a message meant for the user.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::AuthFailed(_)
                | Self::PermissionDenied
                | Self::PermissionDeniedWithContext(_)
                | Self::Duplicate(_)
                | Self::InvalidInput(_)
                | Self::InvalidVerse(_)
                | Self::ChapterNotFound(_)
                | Self::NotFound { .. }
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for TilawahError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
