//! Tilawah Core
//!
//! Platform-agnostic core types, traits, and error handling for Tilawah.
//!
//! This crate provides the foundational building blocks shared by the
//! playback sequencer, the account store, the content clients and the
//! reader application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VerseRef`, `Chapter`, `Verse`, `Bookmark`, `Note`, `ReadingProgress`, etc.
//! - **Collaborator Traits**: `ContentApi`, `AudioApi`, `AccountStore`, `ProgressStore`
//! - **Reader Helpers**: verse navigator items, progress math, form validation
//! - **Error Handling**: Unified `TilawahError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tilawah_core::types::VerseRef;
//! use tilawah_core::navigator::{navigator_items, NavigatorItem};
//! use tilawah_core::progress::completion_percentage;
//!
//! let verse: VerseRef = "1:7".parse().unwrap();
//! assert_eq!(verse.chapter(), 1);
//!
//! let items = navigator_items(7);
//! assert_eq!(items.len(), 7);
//! assert_eq!(items[0], NavigatorItem::Verse(1));
//!
//! assert_eq!(completion_percentage(7, 7), 100.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod navigator;
pub mod progress;
pub mod storage;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, TilawahError};
pub use storage::{AccountStore, ProgressStore};
pub use traits::{AudioApi, ContentApi};

pub use types::{
    ActivityLog, AdminStats, AudioEdition, Bookmark, Chapter, ChapterContent, NewBookmark,
    NewNote, Note, Profile, ReadingProgress, Reciter, Role, SearchResult, Session, Tafsir,
    TranslatedName, Translation, UpdateProfile, UserId, UserWithProfile, Verse, VerseRef,
    CHAPTER_COUNT,
};
