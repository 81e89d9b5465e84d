//! Playback Events
//!
//! Event-based communication for UI synchronization during recitation.
//! Events are queued by the sequencer and drained by the caller:
//! - State changes (play/pause/stop)
//! - Verse started / finished
//! - Chapter finished (auto-advance reached the last verse)
//! - Audio unavailable (resolution returned no URL)

use serde::{Deserialize, Serialize};
use tilawah_core::VerseRef;

use crate::types::PlaybackState;

/// Events emitted by the playback sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A verse's audio started from the beginning
    VerseStarted {
        /// Verse now playing
        verse: VerseRef,
    },

    /// A verse's audio reached its end
    VerseFinished {
        /// Verse that ended
        verse: VerseRef,
    },

    /// The last verse of the chapter finished
    ChapterFinished {
        /// Chapter number
        chapter: u16,
    },

    /// No audio is available for the requested verse
    AudioUnavailable {
        /// Verse that could not be resolved
        verse: VerseRef,
    },
}

impl PlaybackEvent {
    /// The verse this event concerns, if any
    pub fn verse(&self) -> Option<VerseRef> {
        match self {
            Self::VerseStarted { verse }
            | Self::VerseFinished { verse }
            | Self::AudioUnavailable { verse } => Some(*verse),
            Self::StateChanged { .. } | Self::ChapterFinished { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_accessor() {
        let verse = VerseRef::new(1, 3).unwrap();
        assert_eq!(PlaybackEvent::VerseStarted { verse }.verse(), Some(verse));
        assert_eq!(PlaybackEvent::ChapterFinished { chapter: 1 }.verse(), None);
        assert_eq!(
            PlaybackEvent::StateChanged {
                state: PlaybackState::Paused
            }
            .verse(),
            None
        );
    }
}
