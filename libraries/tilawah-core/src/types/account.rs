/// Per-user account data: sessions, profiles, bookmarks, notes, progress
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::verse::VerseRef;
use crate::error::Result;
use crate::progress::completion_percentage;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
}

impl Role {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "moderator" => Some(Self::Moderator),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub roles: Vec<Role>,
}

impl Session {
    /// Whether the session carries the admin role
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

/// Public profile attached to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to update a profile (only provided fields change)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateProfile {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.full_name.is_none() && self.avatar_url.is_none()
    }
}

/// Saved verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: UserId,
    pub surah_number: u16,
    pub verse_number: u16,
    pub surah_name: Option<String>,
    pub verse_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Reference of the bookmarked verse
    pub fn verse_ref(&self) -> Result<VerseRef> {
        VerseRef::new(self.surah_number, self.verse_number)
    }
}

/// Request to create a bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub verse: VerseRef,
    pub surah_name: Option<String>,
    pub verse_text: Option<String>,
}

impl NewBookmark {
    pub fn new(verse: VerseRef) -> Self {
        Self {
            verse,
            surah_name: None,
            verse_text: None,
        }
    }
}

/// Personal note on a verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: UserId,
    pub surah_number: u16,
    pub verse_number: u16,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub verse: VerseRef,
    pub content: String,
}

/// Last read position for a user (one per user)
///
/// Serializes to the upsert payload
/// `{user_id, current_surah, current_verse, completion_percentage, last_read_at}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub user_id: UserId,
    pub current_surah: u16,
    pub current_verse: u16,
    pub completion_percentage: f64,
    pub last_read_at: DateTime<Utc>,
}

impl ReadingProgress {
    /// Progress at `verse` in a chapter of `total_verses`, stamped now
    pub fn at(user_id: UserId, verse: VerseRef, total_verses: u16) -> Self {
        Self {
            user_id,
            current_surah: verse.chapter(),
            current_verse: verse.verse(),
            completion_percentage: completion_percentage(verse.verse(), total_verses),
            last_read_at: Utc::now(),
        }
    }

    /// Reference of the last read verse
    pub fn verse_ref(&self) -> Result<VerseRef> {
        VerseRef::new(self.current_surah, self.current_verse)
    }
}
