//! Tilawah Reader Library
//!
//! Command-line Quran reader and listener: browse chapters, search, read
//! tafsir, listen verse by verse, and keep bookmarks, notes and reading
//! progress in a local account store.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ReaderConfig;
pub use error::{ReaderError, Result};
pub use output::TranscriptOutput;
pub use state::{AppState, Credentials};
