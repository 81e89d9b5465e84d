//! Audio API client (AlQuran.cloud v1): per-verse recitation URLs.

use crate::error::{ContentClientError, Result};
use crate::http::{build_http, get_json, normalize_base_url};
use crate::types::{AudioEditions, AudioEnvelope, AyahAudio, ContentConfig, SurahAudio};
use async_trait::async_trait;
use reqwest::Client;
use tilawah_core::{AudioApi, AudioEdition, VerseRef};
use tracing::debug;

/// Client for the AlQuran.cloud audio API.
#[derive(Clone)]
pub struct AlQuranCloudClient {
    http: Client,
    base_url: String,
}

impl AlQuranCloudClient {
    /// Create a client from configuration.
    pub fn new(config: &ContentConfig) -> Result<Self> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: normalize_base_url(&config.audio_api_url)?,
        })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Audio URL for one verse in a reciter's edition.
    ///
    /// Returns `None` when the API has no audio for this verse/edition.
    pub async fn verse_audio_url(&self, verse: VerseRef, reciter: &str) -> Result<Option<String>> {
        let url = format!("{}/ayah/{}/{}", self.base_url, verse.key(), reciter);

        let envelope: AudioEnvelope<AyahAudio> = match get_json(&self.http, &url, &[]).await {
            Ok(envelope) => envelope,
            Err(ContentClientError::NotFound(_)) => {
                debug!(verse = %verse, reciter, "No audio edition entry");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(envelope
            .data
            .and_then(|ayah| ayah.audio)
            .filter(|audio| !audio.trim().is_empty()))
    }

    /// Audio URLs for every verse of a chapter, in verse order.
    pub async fn chapter_audio_urls(&self, chapter: u16, reciter: &str) -> Result<Vec<String>> {
        let url = format!("{}/surah/{}/{}", self.base_url, chapter, reciter);
        let envelope: AudioEnvelope<SurahAudio> = get_json(&self.http, &url, &[]).await?;

        Ok(envelope
            .data
            .map(|surah| surah.ayahs.into_iter().filter_map(|a| a.audio).collect())
            .unwrap_or_default())
    }

    /// All audio editions (reciters).
    pub async fn audio_editions(&self) -> Result<Vec<AudioEdition>> {
        let url = format!("{}/edition/format/audio", self.base_url);
        let envelope: AudioEnvelope<AudioEditions> = get_json(&self.http, &url, &[]).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl AudioApi for AlQuranCloudClient {
    async fn resolve_verse_audio_url(
        &self,
        chapter: u16,
        verse: u16,
        reciter: &str,
    ) -> tilawah_core::Result<Option<String>> {
        let verse = VerseRef::new(chapter, verse)?;
        Ok(self.verse_audio_url(verse, reciter).await?)
    }

    async fn fetch_chapter_audio(
        &self,
        chapter: u16,
        reciter: &str,
    ) -> tilawah_core::Result<Vec<String>> {
        VerseRef::new(chapter, 1)?;
        Ok(self.chapter_audio_urls(chapter, reciter).await?)
    }

    async fn fetch_audio_editions(&self) -> tilawah_core::Result<Vec<AudioEdition>> {
        Ok(self.audio_editions().await?)
    }
}
