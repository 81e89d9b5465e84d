//! Request epochs for chapter loading
//!
//! Rapid chapter navigation issues overlapping fetches. Each fetch is tagged
//! with a ticket; when its response arrives, it is applied only if no newer
//! fetch was started in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tilawah_core::{ChapterContent, ContentApi, VerseRef};
use tracing::debug;

use crate::error::Result;

/// Tag handed out by [`RequestEpoch::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochTicket(u64);

/// Monotonic request counter
#[derive(Debug, Default)]
pub struct RequestEpoch {
    current: AtomicU64,
}

impl RequestEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier tickets
    pub fn begin(&self) -> EpochTicket {
        EpochTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the latest request
    pub fn is_current(&self, ticket: EpochTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every outstanding ticket without starting a request
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fetches chapter content, discarding superseded responses
pub struct ChapterLoader<C: ContentApi + ?Sized> {
    content: Arc<C>,
    epoch: RequestEpoch,
}

impl<C: ContentApi + ?Sized> ChapterLoader<C> {
    pub fn new(content: Arc<C>) -> Self {
        Self {
            content,
            epoch: RequestEpoch::new(),
        }
    }

    /// Load a chapter's metadata and verses
    ///
    /// Returns `Ok(None)` when a newer `load` was started before this one
    /// finished. Errors from a superseded request are dropped the same way.
    pub async fn load(&self, chapter: u16) -> Result<Option<ChapterContent>> {
        VerseRef::new(chapter, 1)?;

        let ticket = self.epoch.begin();
        let result = self.content.fetch_chapter(chapter).await;

        if !self.epoch.is_current(ticket) {
            debug!(chapter, "Discarding superseded chapter response");
            return Ok(None);
        }

        Ok(Some(result?))
    }

    /// Abandon any in-flight load (e.g. leaving the reader)
    pub fn cancel(&self) {
        self.epoch.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tilawah_core::{
        Chapter, Reciter, SearchResult, Tafsir, TilawahError, TranslatedName, Verse,
    };

    /// Responds after a per-chapter delay so tests control arrival order
    struct SlowContent;

    fn chapter_fixture(id: u16) -> Chapter {
        Chapter {
            id,
            revelation_place: "makkah".into(),
            revelation_order: id,
            bismillah_pre: true,
            name_simple: format!("Chapter {id}"),
            name_complex: format!("Chapter {id}"),
            name_arabic: String::new(),
            verses_count: 3,
            pages: vec![1, 1],
            translated_name: Some(TranslatedName {
                language_name: "english".into(),
                name: format!("Chapter {id}"),
            }),
        }
    }

    #[async_trait::async_trait]
    impl ContentApi for SlowContent {
        async fn fetch_chapters(&self) -> tilawah_core::Result<Vec<Chapter>> {
            Ok(Vec::new())
        }

        async fn fetch_chapter(&self, chapter: u16) -> tilawah_core::Result<ChapterContent> {
            let delay = match chapter {
                1 => 50,
                2 => 25,
                100 => 60,
                _ => 10,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if chapter == 100 {
                return Err(TilawahError::network("boom"));
            }
            Ok(ChapterContent {
                chapter: chapter_fixture(chapter),
                verses: Vec::<Verse>::new(),
            })
        }

        async fn fetch_verse(&self, verse: VerseRef) -> tilawah_core::Result<Verse> {
            Err(TilawahError::not_found("verse", verse.to_string()))
        }

        async fn search(&self, _query: &str) -> tilawah_core::Result<Vec<SearchResult>> {
            Ok(Vec::new())
        }

        async fn fetch_tafsir(&self, verse: VerseRef) -> tilawah_core::Result<Tafsir> {
            Err(TilawahError::not_found("tafsir", verse.to_string()))
        }

        async fn fetch_reciters(&self) -> tilawah_core::Result<Vec<Reciter>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn newer_ticket_supersedes_older() {
        let epoch = RequestEpoch::new();
        let first = epoch.begin();
        assert!(epoch.is_current(first));

        let second = epoch.begin();
        assert!(!epoch.is_current(first));
        assert!(epoch.is_current(second));

        epoch.invalidate();
        assert!(!epoch.is_current(second));
    }

    #[tokio::test]
    async fn latest_request_wins_when_older_arrives_later() {
        let loader = ChapterLoader::new(Arc::new(SlowContent));

        // Chapter 1 sleeps 50ms, chapter 2 sleeps 25ms
        let (older, newer) = tokio::join!(loader.load(1), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            loader.load(2).await
        });

        assert!(older.unwrap().is_none());
        assert_eq!(newer.unwrap().unwrap().chapter.id, 2);
    }

    #[tokio::test]
    async fn superseded_error_is_discarded() {
        let loader = ChapterLoader::new(Arc::new(SlowContent));

        let (failed, newer) = tokio::join!(loader.load(100), loader.load(1));

        // Chapter 100 began first and fails last
        assert!(failed.unwrap().is_none());
        assert!(newer.unwrap().is_some());
    }

    #[tokio::test]
    async fn current_error_is_returned() {
        let loader = ChapterLoader::new(Arc::new(SlowContent));
        assert!(loader.load(100).await.is_err());
    }

    #[tokio::test]
    async fn invalid_chapter_is_rejected_without_fetching() {
        let loader = ChapterLoader::new(Arc::new(SlowContent));
        assert!(loader.load(0).await.is_err());
        assert!(loader.load(115).await.is_err());
    }
}
