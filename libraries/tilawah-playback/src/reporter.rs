//! Reading-progress reporter
//!
//! Persists the reader's position without blocking reading or playback:
//! each report runs on its own task and failures are only logged.

use std::sync::Arc;

use tilawah_core::progress::{scroll_progress, verse_at_progress};
use tilawah_core::{ProgressStore, ReadingProgress, Session, VerseRef};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fire-and-forget progress writer
#[derive(Clone)]
pub struct ProgressReporter {
    store: Arc<dyn ProgressStore>,
}

impl ProgressReporter {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Record `verse` as the user's current position
    ///
    /// Does nothing without a session. Otherwise spawns the upsert and
    /// returns its handle; callers are free to drop it.
    /// Must be called from within a tokio runtime.
    pub fn report(
        &self,
        session: Option<&Session>,
        verse: VerseRef,
        total_verses: u16,
    ) -> Option<JoinHandle<()>> {
        let session = session?;
        let progress = ReadingProgress::at(session.user_id.clone(), verse, total_verses);
        let store = Arc::clone(&self.store);

        Some(tokio::spawn(async move {
            match store.upsert_progress(&progress).await {
                Ok(()) => debug!(
                    user_id = %progress.user_id,
                    verse = %verse,
                    completion = progress.completion_percentage,
                    "Reading progress saved"
                ),
                Err(e) => warn!(
                    user_id = %progress.user_id,
                    verse = %verse,
                    error = %e,
                    "Failed to save reading progress"
                ),
            }
        }))
    }

    /// Report the verse under the viewport for a scroll position
    pub fn report_scroll(
        &self,
        session: Option<&Session>,
        chapter: u16,
        total_verses: u16,
        scroll_y: f64,
        scroll_height: f64,
        viewport_height: f64,
    ) -> Option<JoinHandle<()>> {
        let percent = scroll_progress(scroll_y, scroll_height, viewport_height);
        let verse = verse_at_progress(percent, total_verses);
        let verse = VerseRef::new(chapter, verse).ok()?;
        self.report(session, verse, total_verses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tilawah_core::{Role, TilawahError, UserId};

    #[derive(Default)]
    struct MemoryProgress {
        rows: Mutex<HashMap<UserId, ReadingProgress>>,
    }

    #[async_trait::async_trait]
    impl ProgressStore for MemoryProgress {
        async fn upsert_progress(&self, progress: &ReadingProgress) -> tilawah_core::Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(progress.user_id.clone(), progress.clone());
            Ok(())
        }

        async fn get_progress(
            &self,
            user_id: &UserId,
        ) -> tilawah_core::Result<Option<ReadingProgress>> {
            Ok(self.rows.lock().unwrap().get(user_id).cloned())
        }
    }

    struct FailingProgress;

    #[async_trait::async_trait]
    impl ProgressStore for FailingProgress {
        async fn upsert_progress(&self, _progress: &ReadingProgress) -> tilawah_core::Result<()> {
            Err(TilawahError::storage("disk full"))
        }

        async fn get_progress(
            &self,
            _user_id: &UserId,
        ) -> tilawah_core::Result<Option<ReadingProgress>> {
            Ok(None)
        }
    }

    fn session() -> Session {
        Session {
            user_id: UserId::new("user-1"),
            email: "reader@example.com".into(),
            roles: vec![Role::User],
        }
    }

    #[tokio::test]
    async fn report_upserts_percentage() {
        let store = Arc::new(MemoryProgress::default());
        let reporter = ProgressReporter::new(store.clone());
        let session = session();

        reporter
            .report(Some(&session), VerseRef::new(2, 143).unwrap(), 286)
            .unwrap()
            .await
            .unwrap();

        let saved = store.get_progress(&session.user_id).await.unwrap().unwrap();
        assert_eq!(saved.current_surah, 2);
        assert_eq!(saved.current_verse, 143);
        assert_eq!(saved.completion_percentage, 50.0);
    }

    #[tokio::test]
    async fn later_report_overwrites_earlier() {
        let store = Arc::new(MemoryProgress::default());
        let reporter = ProgressReporter::new(store.clone());
        let session = session();

        for verse in [1, 7] {
            reporter
                .report(Some(&session), VerseRef::new(1, verse).unwrap(), 7)
                .unwrap()
                .await
                .unwrap();
        }

        let saved = store.get_progress(&session.user_id).await.unwrap().unwrap();
        assert_eq!(saved.current_verse, 7);
        assert_eq!(saved.completion_percentage, 100.0);
    }

    #[tokio::test]
    async fn no_session_reports_nothing() {
        let store = Arc::new(MemoryProgress::default());
        let reporter = ProgressReporter::new(store.clone());

        assert!(reporter
            .report(None, VerseRef::new(1, 1).unwrap(), 7)
            .is_none());
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let reporter = ProgressReporter::new(Arc::new(FailingProgress));
        let handle = reporter
            .report(Some(&session()), VerseRef::new(1, 1).unwrap(), 7)
            .unwrap();

        // Task completes normally; the failure is only logged
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn scroll_maps_to_verse_under_viewport() {
        let store = Arc::new(MemoryProgress::default());
        let reporter = ProgressReporter::new(store.clone());
        let session = session();

        reporter
            .report_scroll(Some(&session), 1, 7, 500.0, 2000.0, 1000.0)
            .unwrap()
            .await
            .unwrap();

        let saved = store.get_progress(&session.user_id).await.unwrap().unwrap();
        assert_eq!(saved.current_verse, 4);
    }
}
