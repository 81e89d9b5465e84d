//! Error types for playback sequencing

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No chapter context has been loaded
    #[error("No chapter loaded")]
    NoChapterLoaded,

    /// Verse number outside the loaded chapter
    #[error("Verse {verse} out of range (chapter has {total} verses)")]
    VerseOutOfRange { verse: u16, total: u16 },

    /// Audio output failed to open or start a handle
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Core domain error
    #[error(transparent)]
    Core(#[from] tilawah_core::TilawahError),
}

impl From<PlaybackError> for tilawah_core::TilawahError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::Core(inner) => inner,
            PlaybackError::VerseOutOfRange { verse, total } => {
                Self::InvalidVerse(format!("verse {verse} of a {total}-verse chapter"))
            }
            other => Self::audio(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
