mod account;
mod admin;
mod chapter;
mod ids;
mod verse;

pub use account::{
    Bookmark, NewBookmark, NewNote, Note, Profile, ReadingProgress, Role, Session, UpdateProfile,
};
pub use admin::{ActivityLog, AdminStats, UserWithProfile};
pub use chapter::{AudioEdition, Chapter, ChapterContent, Reciter, TranslatedName};
pub use ids::{generate_record_id, UserId};
pub use verse::{SearchResult, Tafsir, Translation, Verse, VerseRef, CHAPTER_COUNT};
