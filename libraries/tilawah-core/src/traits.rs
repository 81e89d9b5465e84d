/// Content collaborator traits
///
/// The text and audio providers are external, read-only services. These traits
/// describe what the rest of the workspace needs from them so that the HTTP
/// clients can be swapped for fakes in tests.
use crate::error::Result;
use crate::types::{
    AudioEdition, Chapter, ChapterContent, Reciter, SearchResult, Tafsir, Verse, VerseRef,
};
use async_trait::async_trait;

/// Text content provider (chapters, verses, translations, search, tafsir)
///
/// Implementations are assumed idempotent and read-only.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// List all 114 chapters
    async fn fetch_chapters(&self) -> Result<Vec<Chapter>>;

    /// Fetch a chapter's metadata and all of its verses
    async fn fetch_chapter(&self, chapter: u16) -> Result<ChapterContent>;

    /// Fetch a single verse
    async fn fetch_verse(&self, verse: VerseRef) -> Result<Verse>;

    /// Full-text search
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Commentary for a verse
    async fn fetch_tafsir(&self, verse: VerseRef) -> Result<Tafsir>;

    /// Available recitations
    async fn fetch_reciters(&self) -> Result<Vec<Reciter>>;
}

/// Verse audio provider
#[async_trait]
pub trait AudioApi: Send + Sync {
    /// Resolve the playable URL for one verse
    ///
    /// `Ok(None)` means "not available" and is not an error.
    async fn resolve_verse_audio_url(
        &self,
        chapter: u16,
        verse: u16,
        reciter: &str,
    ) -> Result<Option<String>>;

    /// Resolve the URLs for every verse of a chapter, in verse order
    async fn fetch_chapter_audio(&self, chapter: u16, reciter: &str) -> Result<Vec<String>>;

    /// Available audio editions (reciters)
    async fn fetch_audio_editions(&self) -> Result<Vec<AudioEdition>>;
}
