//! Verse navigator
//!
//! Computes the compact list of verse buttons shown beside a chapter: short
//! chapters list every verse, longer ones show the first few verses, an
//! ellipsis and the last verse.

use serde::{Deserialize, Serialize};

/// Chapters with at most this many verses are listed in full
pub const FULL_LIST_LIMIT: u16 = 7;

/// Leading verses shown before the ellipsis in long chapters
pub const LEADING_VERSES: u16 = 5;

/// One entry in the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigatorItem {
    /// A clickable verse number
    Verse(u16),

    /// A non-clickable gap
    Ellipsis,
}

impl NavigatorItem {
    /// Verse number to jump to, `None` for the ellipsis
    pub fn target(&self) -> Option<u16> {
        match self {
            Self::Verse(n) => Some(*n),
            Self::Ellipsis => None,
        }
    }

    /// Whether this item highlights the current verse
    pub fn is_active(&self, current_verse: u16) -> bool {
        self.target() == Some(current_verse)
    }

    /// Button label
    pub fn label(&self) -> String {
        match self {
            Self::Verse(n) => n.to_string(),
            Self::Ellipsis => "...".to_string(),
        }
    }
}

/// Items for a chapter with `total_verses` verses
pub fn navigator_items(total_verses: u16) -> Vec<NavigatorItem> {
    if total_verses <= FULL_LIST_LIMIT {
        return (1..=total_verses).map(NavigatorItem::Verse).collect();
    }

    let mut items: Vec<NavigatorItem> = (1..=LEADING_VERSES).map(NavigatorItem::Verse).collect();
    items.push(NavigatorItem::Ellipsis);
    items.push(NavigatorItem::Verse(total_verses));
    items
}
