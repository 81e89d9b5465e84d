//! Core types for playback sequencing

use serde::{Deserialize, Serialize};

/// Reciter used when none is configured
pub const DEFAULT_RECITER: &str = "ar.alafasy";

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No verse tracked
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-verse (handle retained)
    Paused,
}

/// Loaded chapter context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterContext {
    /// Chapter number (1..=114)
    pub chapter: u16,

    /// Verse count of the chapter
    pub total_verses: u16,
}

/// Configuration for the playback sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Audio edition identifier (default: `ar.alafasy`)
    pub reciter: String,

    /// Start the next verse when one finishes (default: true)
    pub auto_advance: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            reciter: DEFAULT_RECITER.to_string(),
            auto_advance: true,
        }
    }
}
