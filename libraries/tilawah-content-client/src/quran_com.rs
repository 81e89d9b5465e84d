//! Text API client (Quran.com v4): chapters, verses, search, tafsir, reciters.

use crate::error::{ContentClientError, Result};
use crate::http::{build_http, get_json, normalize_base_url};
use crate::types::{
    ChapterResponse, ChaptersResponse, ContentConfig, RecitationsResponse, SearchResponse,
    TafsirResponse, VerseResponse, VersesResponse, SEARCH_PAGE_SIZE, VERSES_PER_PAGE,
};
use async_trait::async_trait;
use reqwest::Client;
use tilawah_core::{
    Chapter, ChapterContent, ContentApi, Reciter, SearchResult, Tafsir, Verse, VerseRef,
};
use tracing::{debug, info};

/// Client for the Quran.com text API.
///
/// # Example
///
/// ```ignore
/// use tilawah_content_client::{ContentConfig, QuranComClient};
///
/// let client = QuranComClient::new(&ContentConfig::default())?;
/// let content = client.get_chapter(1).await?;
/// println!("{} has {} verses", content.chapter.name_simple, content.verses.len());
/// ```
#[derive(Clone)]
pub struct QuranComClient {
    http: Client,
    base_url: String,
    translation_id: u32,
    tafsir_id: u32,
}

impl QuranComClient {
    /// Create a client from configuration.
    pub fn new(config: &ContentConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: normalize_base_url(&config.quran_api_url)?,
            translation_id: config.translation_id,
            tafsir_id: config.tafsir_id,
        })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all 114 chapters.
    pub async fn get_chapters(&self) -> Result<Vec<Chapter>> {
        let url = format!("{}/chapters", self.base_url);
        let response: ChaptersResponse = get_json(&self.http, &url, &[]).await?;

        debug!(count = response.chapters.len(), "Fetched chapters");
        Ok(response.chapters)
    }

    /// Fetch a chapter's metadata and all of its verses with translations.
    ///
    /// Both requests are issued concurrently.
    pub async fn get_chapter(&self, chapter: u16) -> Result<ChapterContent> {
        let chapter_url = format!("{}/chapters/{}", self.base_url, chapter);
        let verses_url = format!("{}/verses/by_chapter/{}", self.base_url, chapter);
        let verses_query = [
            ("translations", self.translation_id.to_string()),
            ("fields", "text_uthmani".to_string()),
            ("per_page", VERSES_PER_PAGE.to_string()),
        ];

        let (meta, verses) = tokio::try_join!(
            get_json::<ChapterResponse>(&self.http, &chapter_url, &[]),
            get_json::<VersesResponse>(&self.http, &verses_url, &verses_query),
        )?;

        info!(
            chapter,
            name = %meta.chapter.name_simple,
            verses = verses.verses.len(),
            "Fetched chapter"
        );

        Ok(ChapterContent {
            chapter: meta.chapter,
            verses: verses.verses,
        })
    }

    /// Fetch a single verse.
    pub async fn get_verse(&self, verse: VerseRef) -> Result<Verse> {
        let url = format!("{}/verses/by_key/{}", self.base_url, verse.key());
        let query = [
            ("translations", self.translation_id.to_string()),
            ("fields", "text_uthmani".to_string()),
        ];
        let response: VerseResponse = get_json(&self.http, &url, &query).await?;
        Ok(response.verse)
    }

    /// Full-text search (first page of results).
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("size", SEARCH_PAGE_SIZE.to_string()),
            ("translations", self.translation_id.to_string()),
        ];
        let response: SearchResponse = get_json(&self.http, &url, &params).await?;

        let results = response.search.map(|s| s.results).unwrap_or_default();
        debug!(query, hits = results.len(), "Search complete");
        Ok(results)
    }

    /// Commentary for one verse.
    pub async fn get_tafsir(&self, verse: VerseRef) -> Result<Tafsir> {
        let url = format!(
            "{}/tafsirs/{}/by_ayah/{}",
            self.base_url,
            self.tafsir_id,
            verse.key()
        );
        let response: TafsirResponse = get_json(&self.http, &url, &[]).await?;

        if response.tafsir.text.trim().is_empty() {
            return Err(ContentClientError::NotFound(format!("tafsir for {verse}")));
        }
        Ok(response.tafsir)
    }

    /// Recitations offered by the text API.
    pub async fn get_reciters(&self) -> Result<Vec<Reciter>> {
        let url = format!("{}/resources/recitations", self.base_url);
        let response: RecitationsResponse = get_json(&self.http, &url, &[]).await?;
        Ok(response.recitations)
    }
}

#[async_trait]
impl ContentApi for QuranComClient {
    async fn fetch_chapters(&self) -> tilawah_core::Result<Vec<Chapter>> {
        Ok(self.get_chapters().await?)
    }

    async fn fetch_chapter(&self, chapter: u16) -> tilawah_core::Result<ChapterContent> {
        VerseRef::new(chapter, 1)?;
        Ok(self.get_chapter(chapter).await?)
    }

    async fn fetch_verse(&self, verse: VerseRef) -> tilawah_core::Result<Verse> {
        Ok(self.get_verse(verse).await?)
    }

    async fn search(&self, query: &str) -> tilawah_core::Result<Vec<SearchResult>> {
        Ok(QuranComClient::search(self, query).await?)
    }

    async fn fetch_tafsir(&self, verse: VerseRef) -> tilawah_core::Result<Tafsir> {
        Ok(self.get_tafsir(verse).await?)
    }

    async fn fetch_reciters(&self) -> tilawah_core::Result<Vec<Reciter>> {
        Ok(self.get_reciters().await?)
    }
}
