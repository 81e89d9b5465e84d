/// Reader error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sign-in required: pass --email and --password (or set TILAWAH_EMAIL / TILAWAH_PASSWORD)")]
    MissingCredentials,

    #[error(transparent)]
    Core(#[from] tilawah_core::TilawahError),

    #[error(transparent)]
    Storage(#[from] tilawah_storage::StorageError),

    #[error(transparent)]
    Content(#[from] tilawah_content_client::ContentClientError),

    #[error(transparent)]
    Playback(#[from] tilawah_playback::PlaybackError),
}

impl ReaderError {
    /// Message suitable for printing to the terminal
    ///
    /// Validation and permission failures keep their text; infrastructure
    /// failures are summarized.
    pub fn user_message(&self) -> String {
        match self {
            Self::Core(e) => core_message(e),
            Self::Content(_) => CONTENT_UNAVAILABLE.to_string(),
            Self::Storage(_) => "Account store unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

const CONTENT_UNAVAILABLE: &str = "Content service unavailable, try again later";

/// Terminal message for a domain error
pub fn core_message(err: &tilawah_core::TilawahError) -> String {
    use tilawah_core::TilawahError;
    match err {
        e if e.is_user_facing() => e.to_string(),
        TilawahError::Network(_) => CONTENT_UNAVAILABLE.to_string(),
        TilawahError::Storage(_) | TilawahError::Database(_) => {
            "Account store error".to_string()
        }
        other => other.to_string(),
    }
}
