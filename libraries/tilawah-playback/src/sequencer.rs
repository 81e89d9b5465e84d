//! Playback sequencer - verse-by-verse recitation
//!
//! Plays one verse's audio at a time and, when it ends, starts the next verse
//! until the chapter is finished or playback is paused/stopped.

use std::sync::Arc;

use tilawah_core::{AudioApi, Session, VerseRef};
use tracing::{debug, info, warn};

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::{AudioHandle, AudioOutput},
    reporter::ProgressReporter,
    types::{ChapterContext, PlaybackConfig, PlaybackState},
};

/// The single live audio stream and the verse it belongs to
struct ActiveAudio {
    verse: VerseRef,
    handle: Box<dyn AudioHandle>,
}

impl ActiveAudio {
    /// Silence and rewind; the handle is released when `self` is dropped
    fn stop(mut self) {
        self.handle.pause();
        self.handle.reset();
    }
}

/// Central recitation control
///
/// Owns the audio output and at most one audio handle. Every path that
/// replaces or abandons the handle (new verse, completion, chapter change,
/// stop, drop) pauses and releases it first, so two verses are never audible
/// at the same time.
///
/// All operations take `&mut self`; callers that share a sequencer serialize
/// access through a single owner (e.g. a `tokio::sync::Mutex`).
pub struct PlaybackSequencer<O: AudioOutput> {
    // Collaborators
    audio_api: Arc<dyn AudioApi>,
    output: O,
    progress: Option<(ProgressReporter, Session)>,

    // Settings
    reciter: String,
    auto_advance: bool,

    // State
    state: PlaybackState,
    chapter: Option<ChapterContext>,
    active: Option<ActiveAudio>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackSequencer<O> {
    /// Create a new sequencer
    pub fn new(audio_api: Arc<dyn AudioApi>, output: O, config: PlaybackConfig) -> Self {
        Self {
            audio_api,
            output,
            progress: None,
            reciter: config.reciter,
            auto_advance: config.auto_advance,
            state: PlaybackState::Stopped,
            chapter: None,
            active: None,
            pending_events: Vec::new(),
        }
    }

    /// Report reading progress for `session` whenever a verse starts
    pub fn set_progress_reporter(&mut self, reporter: ProgressReporter, session: Session) {
        self.progress = Some((reporter, session));
    }

    /// Stop reporting progress (sign-out)
    pub fn clear_progress_reporter(&mut self) {
        self.progress = None;
    }

    // ===== Chapter Context =====

    /// Switch to a chapter
    ///
    /// Any audio from the previous chapter is stopped and released.
    pub fn load_chapter(&mut self, chapter: u16, total_verses: u16) -> Result<()> {
        // Validates the chapter number
        VerseRef::new(chapter, 1)?;

        self.stop();
        self.chapter = Some(ChapterContext {
            chapter,
            total_verses,
        });
        debug!(chapter, total_verses, "Chapter loaded into sequencer");
        Ok(())
    }

    // ===== Playback Control =====

    /// Play a verse of the loaded chapter from the beginning
    ///
    /// Resolution failures and unavailable audio leave the state untouched
    /// and are only logged.
    pub async fn play(&mut self, verse: u16) -> Result<()> {
        let context = self.chapter.ok_or(PlaybackError::NoChapterLoaded)?;
        if verse == 0 || verse > context.total_verses {
            return Err(PlaybackError::VerseOutOfRange {
                verse,
                total: context.total_verses,
            });
        }
        let verse_ref = VerseRef::new(context.chapter, verse)?;

        let url = match self
            .audio_api
            .resolve_verse_audio_url(context.chapter, verse, &self.reciter)
            .await
        {
            Ok(Some(url)) if !url.trim().is_empty() => url,
            Ok(_) => {
                info!(verse = %verse_ref, reciter = %self.reciter, "No audio available for verse");
                self.pending_events
                    .push(PlaybackEvent::AudioUnavailable { verse: verse_ref });
                return Ok(());
            }
            Err(e) => {
                warn!(verse = %verse_ref, error = %e, "Failed to resolve verse audio");
                return Ok(());
            }
        };

        // Release before acquire
        self.release_active();

        let mut handle = match self.output.open(&url) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(verse = %verse_ref, url = %url, error = %e, "Failed to open verse audio");
                self.set_state(PlaybackState::Stopped);
                return Err(e);
            }
        };
        if let Err(e) = handle.play() {
            warn!(verse = %verse_ref, error = %e, "Failed to start verse audio");
            self.set_state(PlaybackState::Stopped);
            return Err(e);
        }

        self.active = Some(ActiveAudio {
            verse: verse_ref,
            handle,
        });
        self.pending_events
            .push(PlaybackEvent::VerseStarted { verse: verse_ref });
        self.set_state(PlaybackState::Playing);
        debug!(verse = %verse_ref, url = %url, "Verse playing");

        self.report_progress(verse_ref, context.total_verses);
        Ok(())
    }

    /// Toggle between playing and paused
    ///
    /// Nothing tracked: plays `fallback_verse` if given, otherwise does nothing.
    pub async fn toggle(&mut self, fallback_verse: Option<u16>) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                if self.active.is_some() {
                    self.resume()
                } else if let Some(verse) = fallback_verse {
                    self.play(verse).await
                } else {
                    debug!("Toggle with nothing to play");
                    Ok(())
                }
            }
        }
    }

    /// Pause the active verse, keeping its handle for an immediate resume
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Some(active) = self.active.as_mut() {
            active.handle.pause();
        }
        self.set_state(PlaybackState::Paused);
    }

    /// Resume the paused verse without resolving its audio again
    pub fn resume(&mut self) -> Result<()> {
        if self.state != PlaybackState::Paused {
            return Ok(());
        }
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| PlaybackError::InvalidOperation("nothing to resume".into()))?;
        active.handle.play()?;
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Stop playback and release the handle
    pub fn stop(&mut self) {
        let had_audio = self.active.is_some();
        self.release_active();
        if had_audio || self.state != PlaybackState::Stopped {
            self.set_state(PlaybackState::Stopped);
        }
    }

    /// End-of-track callback
    ///
    /// Clears the tracked verse and, unless it was the chapter's last verse,
    /// starts the next one.
    pub async fn on_completion(&mut self) -> Result<()> {
        let Some(finished) = self.active.take() else {
            debug!("Completion with no active verse ignored");
            return Ok(());
        };
        let verse = finished.verse;
        drop(finished);

        self.set_state(PlaybackState::Stopped);
        self.pending_events.push(PlaybackEvent::VerseFinished { verse });

        let total = self
            .chapter
            .filter(|c| c.chapter == verse.chapter())
            .map_or(0, |c| c.total_verses);

        match verse.next_in_chapter(total) {
            Some(next) if self.auto_advance => self.play(next.verse()).await,
            Some(_) => Ok(()),
            None => {
                info!(chapter = verse.chapter(), "Chapter recitation finished");
                self.pending_events.push(PlaybackEvent::ChapterFinished {
                    chapter: verse.chapter(),
                });
                Ok(())
            }
        }
    }

    /// Check the active handle and run completion if it ended
    ///
    /// Returns true when a completion was processed.
    pub async fn poll_completion(&mut self) -> Result<bool> {
        let finished = self.state == PlaybackState::Playing
            && self
                .active
                .as_ref()
                .is_some_and(|active| active.handle.is_finished());

        if finished {
            self.on_completion().await?;
        }
        Ok(finished)
    }

    // ===== Settings =====

    /// Change the reciter for subsequently resolved verses
    pub fn set_reciter(&mut self, reciter: impl Into<String>) {
        self.reciter = reciter.into();
    }

    pub fn reciter(&self) -> &str {
        &self.reciter
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Verse currently loaded (playing or paused)
    pub fn current_verse(&self) -> Option<VerseRef> {
        self.active.as_ref().map(|active| active.verse)
    }

    pub fn chapter(&self) -> Option<ChapterContext> {
        self.chapter
    }

    pub fn total_verses(&self) -> Option<u16> {
        self.chapter.map(|c| c.total_verses)
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn release_active(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(verse = %active.verse, "Releasing audio handle");
            active.stop();
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn report_progress(&self, verse: VerseRef, total_verses: u16) {
        if let Some((reporter, session)) = &self.progress {
            // Fire-and-forget; the task logs its own failure
            let _ = reporter.report(Some(session), verse, total_verses);
        }
    }
}

impl<O: AudioOutput> Drop for PlaybackSequencer<O> {
    fn drop(&mut self) {
        self.release_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::dummy::DummyOutput;
    use std::sync::atomic::Ordering;
    use tilawah_core::AudioEdition;

    struct FixedAudioApi;

    #[async_trait::async_trait]
    impl AudioApi for FixedAudioApi {
        async fn resolve_verse_audio_url(
            &self,
            chapter: u16,
            verse: u16,
            reciter: &str,
        ) -> tilawah_core::Result<Option<String>> {
            Ok(Some(format!("https://cdn.test/{reciter}/{chapter}/{verse}.mp3")))
        }

        async fn fetch_chapter_audio(
            &self,
            _chapter: u16,
            _reciter: &str,
        ) -> tilawah_core::Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn fetch_audio_editions(&self) -> tilawah_core::Result<Vec<AudioEdition>> {
            Ok(Vec::new())
        }
    }

    fn sequencer() -> PlaybackSequencer<DummyOutput> {
        PlaybackSequencer::new(
            Arc::new(FixedAudioApi),
            DummyOutput::default(),
            PlaybackConfig::default(),
        )
    }

    #[tokio::test]
    async fn play_without_chapter_is_an_error() {
        let mut seq = sequencer();
        assert!(matches!(
            seq.play(1).await,
            Err(PlaybackError::NoChapterLoaded)
        ));
    }

    #[tokio::test]
    async fn poll_completion_advances_when_handle_finishes() {
        let mut seq = sequencer();
        seq.load_chapter(1, 7).unwrap();
        seq.play(1).await.unwrap();

        assert!(!seq.poll_completion().await.unwrap());

        seq.output().finished.store(true, Ordering::SeqCst);
        assert!(seq.poll_completion().await.unwrap());
        assert_eq!(seq.current_verse().map(|v| v.verse()), Some(2));
    }

    #[tokio::test]
    async fn dropping_the_sequencer_releases_the_handle() {
        let output = DummyOutput::default();
        let live = Arc::clone(&output.live_handles);
        {
            let mut seq =
                PlaybackSequencer::new(Arc::new(FixedAudioApi), output, PlaybackConfig::default());
            seq.load_chapter(1, 7).unwrap();
            seq.play(3).await.unwrap();
            assert_eq!(live.load(Ordering::SeqCst), 1);
        }
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn load_chapter_stops_previous_audio() {
        let mut seq = sequencer();
        seq.load_chapter(1, 7).unwrap();
        seq.play(2).await.unwrap();

        seq.load_chapter(2, 286).unwrap();
        assert_eq!(seq.state(), PlaybackState::Stopped);
        assert!(seq.current_verse().is_none());
        assert_eq!(seq.output().live_handles.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn load_chapter_rejects_unknown_chapter() {
        let mut seq = sequencer();
        assert!(seq.load_chapter(115, 3).is_err());
        assert!(seq.chapter().is_none());
    }
}
