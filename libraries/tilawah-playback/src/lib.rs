//! Tilawah - Recitation Playback
//!
//! Platform-agnostic verse-by-verse recitation for Tilawah.
//!
//! This crate provides:
//! - Single-active-audio sequencing (one verse audible at a time)
//! - Auto-advance through a chapter, stopping after its last verse
//! - Toggle/pause/resume without re-resolving audio
//! - Fire-and-forget reading-progress reporting
//! - Request epochs so only the latest chapter load is applied
//!
//! # Architecture
//!
//! `tilawah-playback` knows nothing about HTTP, SQLite or audio devices:
//! - Audio URLs come from an [`AudioApi`](tilawah_core::AudioApi)
//! - Audio is produced by an [`AudioOutput`] supplied by the platform
//! - Progress is persisted through a [`ProgressStore`](tilawah_core::ProgressStore)
//!
//! # Example
//!
//! ```rust,ignore
//! use tilawah_playback::{PlaybackConfig, PlaybackSequencer};
//!
//! let mut sequencer = PlaybackSequencer::new(audio_api, output, PlaybackConfig::default());
//! sequencer.load_chapter(1, 7)?;
//! sequencer.play(1).await?;
//!
//! // Platform loop
//! loop {
//!     sequencer.poll_completion().await?;
//!     for event in sequencer.drain_events() {
//!         // Update UI
//!     }
//! }
//! ```

mod epoch;
mod error;
mod events;
mod output;
mod reporter;
mod sequencer;
pub mod types;

pub use epoch::{ChapterLoader, EpochTicket, RequestEpoch};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{AudioHandle, AudioOutput};
pub use reporter::ProgressReporter;
pub use sequencer::PlaybackSequencer;
pub use types::{ChapterContext, PlaybackConfig, PlaybackState, DEFAULT_RECITER};
