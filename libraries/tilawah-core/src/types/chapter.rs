/// Chapter metadata and reciter types
use serde::{Deserialize, Serialize};

use super::verse::Verse;

/// Localized chapter name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedName {
    pub language_name: String,
    pub name: String,
}

/// Chapter (surah) metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u16,

    /// "makkah" or "madinah"
    #[serde(default)]
    pub revelation_place: String,

    #[serde(default)]
    pub revelation_order: u16,

    /// Whether the chapter is preceded by the basmala
    #[serde(default)]
    pub bismillah_pre: bool,

    pub name_simple: String,

    #[serde(default)]
    pub name_complex: String,

    #[serde(default)]
    pub name_arabic: String,

    pub verses_count: u16,

    #[serde(default)]
    pub pages: Vec<u16>,

    #[serde(default)]
    pub translated_name: Option<TranslatedName>,
}

/// A chapter with its verses loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContent {
    pub chapter: Chapter,
    pub verses: Vec<Verse>,
}

impl ChapterContent {
    /// Number of verses the chapter declares
    pub fn total_verses(&self) -> u16 {
        self.chapter.verses_count
    }

    /// Look up a loaded verse by number
    pub fn verse(&self, number: u16) -> Option<&Verse> {
        self.verses.iter().find(|v| v.verse_number == number)
    }
}

/// Recitation resource from the text API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reciter {
    pub id: u32,
    pub reciter_name: String,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub translated_name: Option<TranslatedName>,
}

/// Audio edition from the audio API (e.g. `ar.alafasy`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEdition {
    /// Identifier used when resolving verse audio
    pub identifier: String,

    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "englishName")]
    pub english_name: String,

    #[serde(default)]
    pub format: String,

    #[serde(default, rename = "type")]
    pub edition_type: String,
}
