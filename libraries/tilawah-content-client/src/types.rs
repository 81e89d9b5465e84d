//! Client configuration and API response envelopes.

use serde::{Deserialize, Serialize};
use tilawah_core::{AudioEdition, Chapter, Reciter, SearchResult, Tafsir, Verse};

/// Default base URL of the text API
pub const DEFAULT_QURAN_API_URL: &str = "https://api.quran.com/api/v4";

/// Default base URL of the audio API
pub const DEFAULT_AUDIO_API_URL: &str = "https://api.alquran.cloud/v1";

/// Default translation resource (Sahih International)
pub const DEFAULT_TRANSLATION_ID: u32 = 131;

/// Default tafsir resource (Ibn Kathir, English)
pub const DEFAULT_TAFSIR_ID: u32 = 169;

/// Largest chapter (Al-Baqarah) fits in one page
pub(crate) const VERSES_PER_PAGE: u16 = 286;

/// Number of search hits requested
pub(crate) const SEARCH_PAGE_SIZE: u16 = 20;

/// Configuration for the content API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Base URL of the text API
    pub quran_api_url: String,
    /// Base URL of the audio API
    pub audio_api_url: String,
    /// Translation resource attached to verses and search hits
    pub translation_id: u32,
    /// Tafsir resource
    pub tafsir_id: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            quran_api_url: DEFAULT_QURAN_API_URL.to_string(),
            audio_api_url: DEFAULT_AUDIO_API_URL.to_string(),
            translation_id: DEFAULT_TRANSLATION_ID,
            tafsir_id: DEFAULT_TAFSIR_ID,
            timeout_secs: 30,
        }
    }
}

impl ContentConfig {
    /// Config pointing both clients at the given base URLs.
    pub fn with_urls(quran_api_url: impl Into<String>, audio_api_url: impl Into<String>) -> Self {
        Self {
            quran_api_url: quran_api_url.into(),
            audio_api_url: audio_api_url.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Text API Envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ChaptersResponse {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChapterResponse {
    pub chapter: Chapter,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersesResponse {
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerseResponse {
    pub verse: Verse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub search: Option<SearchPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TafsirResponse {
    pub tafsir: Tafsir,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecitationsResponse {
    #[serde(default)]
    pub recitations: Vec<Reciter>,
}

// =============================================================================
// Audio API Envelopes
// =============================================================================

/// `{ code, status, data }` wrapper used by every audio API response
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct AudioEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AyahAudio {
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SurahAudio {
    #[serde(default)]
    pub ayahs: Vec<AyahAudio>,
}

pub(crate) type AudioEditions = Vec<AudioEdition>;
