/// Verse addressing and verse content types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TilawahError};

/// Number of chapters (surahs)
pub const CHAPTER_COUNT: u16 = 114;

/// Address of a single verse: `(chapter, verse)`, both 1-indexed
///
/// Construction validates the chapter range; the upper bound of the verse
/// number depends on the chapter and is checked with [`VerseRef::within`]
/// once the chapter's verse count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawVerseRef")]
pub struct VerseRef {
    chapter: u16,
    verse: u16,
}

/// Unchecked wire form of [`VerseRef`]
#[derive(Deserialize)]
struct RawVerseRef {
    chapter: u16,
    verse: u16,
}

impl TryFrom<RawVerseRef> for VerseRef {
    type Error = TilawahError;

    fn try_from(raw: RawVerseRef) -> Result<Self> {
        Self::new(raw.chapter, raw.verse)
    }
}

impl VerseRef {
    /// Create a verse reference
    ///
    /// # Errors
    /// Returns `InvalidVerse` if the chapter is outside `1..=114` or the verse is 0
    pub fn new(chapter: u16, verse: u16) -> Result<Self> {
        if chapter == 0 || chapter > CHAPTER_COUNT {
            return Err(TilawahError::InvalidVerse(format!(
                "chapter {} outside 1..={}",
                chapter, CHAPTER_COUNT
            )));
        }
        if verse == 0 {
            return Err(TilawahError::InvalidVerse(format!(
                "{}:0 (verses start at 1)",
                chapter
            )));
        }
        Ok(Self { chapter, verse })
    }

    /// Chapter number (1..=114)
    pub fn chapter(&self) -> u16 {
        self.chapter
    }

    /// Verse number within the chapter
    pub fn verse(&self) -> u16 {
        self.verse
    }

    /// Check the verse number against the chapter's verse count
    pub fn within(&self, total_verses: u16) -> Result<Self> {
        if self.verse > total_verses {
            return Err(TilawahError::InvalidVerse(format!(
                "{} (chapter has {} verses)",
                self, total_verses
            )));
        }
        Ok(*self)
    }

    /// The following verse in the same chapter, if any
    pub fn next_in_chapter(&self, total_verses: u16) -> Option<Self> {
        (self.verse < total_verses).then(|| Self {
            chapter: self.chapter,
            verse: self.verse + 1,
        })
    }

    /// The `chapter:verse` key used by the content APIs
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl FromStr for VerseRef {
    type Err = TilawahError;

    fn from_str(s: &str) -> Result<Self> {
        let (chapter, verse) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TilawahError::InvalidVerse(format!("'{}' is not chapter:verse", s)))?;

        let chapter = chapter
            .parse::<u16>()
            .map_err(|_| TilawahError::InvalidVerse(format!("bad chapter in '{}'", s)))?;
        let verse = verse
            .parse::<u16>()
            .map_err(|_| TilawahError::InvalidVerse(format!("bad verse in '{}'", s)))?;

        Self::new(chapter, verse)
    }
}

/// A translation attached to a verse or search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub id: Option<u32>,

    #[serde(default)]
    pub resource_id: Option<u32>,

    /// Translator / resource name (search results only)
    #[serde(default)]
    pub name: Option<String>,

    pub text: String,
}

/// A verse as delivered by the text API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub id: u32,
    pub verse_number: u16,

    /// `chapter:verse`
    pub verse_key: String,

    /// Arabic text in Uthmani script
    #[serde(default)]
    pub text_uthmani: String,

    #[serde(default)]
    pub juz_number: Option<u16>,

    #[serde(default)]
    pub hizb_number: Option<u16>,

    #[serde(default)]
    pub rub_number: Option<u16>,

    #[serde(default)]
    pub sajdah_type: Option<String>,

    #[serde(default)]
    pub page_number: Option<u16>,

    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Verse {
    /// Parse the verse key into a reference
    pub fn verse_ref(&self) -> Result<VerseRef> {
        self.verse_key.parse()
    }

    /// First translation text, if any was requested
    pub fn translation(&self) -> Option<&str> {
        self.translations.first().map(|t| t.text.as_str())
    }
}

/// A hit from full-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub verse_key: String,

    #[serde(default)]
    pub verse_id: Option<u32>,

    /// Matched text (may contain highlight markup)
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// Commentary for a single verse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tafsir {
    #[serde(default)]
    pub resource_id: Option<u32>,

    #[serde(default)]
    pub resource_name: Option<String>,

    #[serde(default)]
    pub language_name: Option<String>,

    pub text: String,
}
