//! Platform-agnostic audio output traits
//!
//! Abstracts the audio element (desktop player, browser audio, test double)
//! behind an output that opens one handle per verse URL.

use crate::error::Result;
use std::time::Duration;

/// One loaded audio stream
///
/// Dropping the handle releases it. The sequencer never holds more than one.
pub trait AudioHandle: Send {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause, keeping the current position
    fn pause(&mut self);

    /// Seek back to the beginning
    fn reset(&mut self);

    /// Check if the stream has reached its end
    fn is_finished(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration {
        Duration::ZERO
    }
}

/// Factory for audio handles
pub trait AudioOutput: Send {
    /// Load the audio at `url`
    ///
    /// # Returns
    /// * `Ok(handle)` - Handle ready to `play()`
    /// * `Err(_)` - The URL could not be loaded
    fn open(&mut self, url: &str) -> Result<Box<dyn AudioHandle>>;
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn open(&mut self, url: &str) -> Result<Box<dyn AudioHandle>> {
        (**self).open(url)
    }
}

/// Dummy output for unit tests
///
/// Handles finish as soon as `finish()` is called on the shared flag.
#[cfg(test)]
pub(crate) mod dummy {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    pub struct DummyOutput {
        pub opened: Arc<Mutex<Vec<String>>>,
        pub live_handles: Arc<AtomicUsize>,
        pub finished: Arc<AtomicBool>,
    }

    pub struct DummyHandle {
        live_handles: Arc<AtomicUsize>,
        finished: Arc<AtomicBool>,
        playing: bool,
    }

    impl AudioOutput for DummyOutput {
        fn open(&mut self, url: &str) -> Result<Box<dyn AudioHandle>> {
            self.opened.lock().unwrap().push(url.to_string());
            self.live_handles.fetch_add(1, Ordering::SeqCst);
            self.finished.store(false, Ordering::SeqCst);
            Ok(Box::new(DummyHandle {
                live_handles: Arc::clone(&self.live_handles),
                finished: Arc::clone(&self.finished),
                playing: false,
            }))
        }
    }

    impl AudioHandle for DummyHandle {
        fn play(&mut self) -> Result<()> {
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn reset(&mut self) {}

        fn is_finished(&self) -> bool {
            self.finished.load(Ordering::SeqCst)
        }
    }

    impl Drop for DummyHandle {
        fn drop(&mut self) {
            self.live_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
