//! Terminal audio output
//!
//! The CLI has no audio device. `TranscriptOutput` stands in for one: each
//! handle logs the recitation URL and reports itself finished once the
//! configured verse duration of play time has elapsed.

use std::time::{Duration, Instant};
use tilawah_playback::{AudioHandle, AudioOutput};
use tracing::{debug, info};

/// Audio output that "plays" each verse for a fixed duration
#[derive(Debug, Clone)]
pub struct TranscriptOutput {
    verse_duration: Duration,
    opened: usize,
}

impl TranscriptOutput {
    pub fn new(verse_duration: Duration) -> Self {
        Self {
            verse_duration,
            opened: 0,
        }
    }

    /// Number of handles opened so far
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl AudioOutput for TranscriptOutput {
    fn open(&mut self, url: &str) -> tilawah_playback::Result<Box<dyn AudioHandle>> {
        self.opened += 1;
        info!(url, "Reciting");
        Ok(Box::new(TranscriptHandle {
            url: url.to_string(),
            duration: self.verse_duration,
            played: Duration::ZERO,
            started_at: None,
        }))
    }
}

/// One simulated stream
///
/// Play time accumulates only while playing, so pause/resume behaves like a
/// real player.
struct TranscriptHandle {
    url: String,
    duration: Duration,
    played: Duration,
    started_at: Option<Instant>,
}

impl TranscriptHandle {
    fn elapsed(&self) -> Duration {
        self.played + self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

impl AudioHandle for TranscriptHandle {
    fn play(&mut self) -> tilawah_playback::Result<()> {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.played += started.elapsed();
        }
    }

    fn reset(&mut self) {
        self.played = Duration::ZERO;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed() >= self.duration
    }

    fn position(&self) -> Duration {
        self.elapsed().min(self.duration)
    }
}

impl Drop for TranscriptHandle {
    fn drop(&mut self) {
        debug!(url = %self.url, "Released audio");
    }
}
