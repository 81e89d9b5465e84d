//! Signed-in commands: registration, bookmarks, notes, progress, profile

use crate::error::ReaderError;
use crate::state::AppState;
use anyhow::Context;
use tilawah_core::validation::validate_registration;
use tilawah_core::{
    AccountStore, ContentApi, NewBookmark, NewNote, ProgressStore, ReadingProgress, UpdateProfile,
    VerseRef,
};
use tilawah_storage::accounts;

pub async fn register(
    state: &AppState,
    full_name: &str,
    confirm_password: Option<&str>,
) -> anyhow::Result<()> {
    let credentials = state.credentials().ok_or(ReaderError::MissingCredentials)?;
    let confirm = confirm_password.unwrap_or(&credentials.password);
    validate_registration(full_name, &credentials.email, &credentials.password, confirm)?;

    let pool = state.pool().await?;
    let session = accounts::register(&pool, &credentials.email, &credentials.password, full_name)
        .await
        .context("Registration failed")?;

    println!("Registered {} ({})", session.email, session.user_id);
    Ok(())
}

// ============================================================================
// Bookmarks
// ============================================================================

pub async fn bookmark_add(state: &AppState, verse: VerseRef) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;

    // Keep the chapter name and verse text alongside the bookmark
    let mut bookmark = NewBookmark::new(verse);
    match state.content.fetch_verse(verse).await {
        Ok(fetched) => {
            bookmark.verse_text = fetched.translation().map(ToString::to_string);
        }
        Err(e) => tracing::warn!(verse = %verse, error = %e, "Bookmarking without verse text"),
    }
    if let Ok(chapters) = state.content.fetch_chapters().await {
        bookmark.surah_name = chapters
            .into_iter()
            .find(|c| c.id == verse.chapter())
            .map(|c| c.name_simple);
    }

    let saved = store.add_bookmark(bookmark).await?;
    println!("Bookmarked {verse} ({})", saved.id);
    Ok(())
}

pub async fn bookmark_list(state: &AppState) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    let bookmarks = store.get_bookmarks().await?;

    if bookmarks.is_empty() {
        println!("No bookmarks yet");
        return Ok(());
    }

    for bookmark in bookmarks {
        println!(
            "{}  {}:{:<4} {:<16} {}",
            bookmark.id,
            bookmark.surah_number,
            bookmark.verse_number,
            bookmark.surah_name.as_deref().unwrap_or("-"),
            bookmark.created_at.format("%Y-%m-%d %H:%M")
        );
        if let Some(text) = &bookmark.verse_text {
            println!("      {text}");
        }
    }
    Ok(())
}

pub async fn bookmark_remove(state: &AppState, id: &str) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    store.remove_bookmark(id).await?;
    println!("Removed bookmark {id}");
    Ok(())
}

// ============================================================================
// Notes
// ============================================================================

pub async fn note_add(state: &AppState, verse: VerseRef, content: String) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    let note = store.add_note(NewNote { verse, content }).await?;
    println!("Added note {} on {verse}", note.id);
    Ok(())
}

pub async fn note_edit(state: &AppState, id: &str, content: &str) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    let note = store.update_note(id, content).await?;
    println!(
        "Updated note {} ({}:{})",
        note.id, note.surah_number, note.verse_number
    );
    Ok(())
}

pub async fn note_delete(state: &AppState, id: &str) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    store.delete_note(id).await?;
    println!("Deleted note {id}");
    Ok(())
}

pub async fn note_list(state: &AppState, verse: Option<VerseRef>) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    let notes = match verse {
        Some(verse) => store.get_verse_notes(verse).await?,
        None => store.get_notes().await?,
    };

    if notes.is_empty() {
        println!("No notes");
        return Ok(());
    }

    for note in notes {
        println!(
            "{}  {}:{}  {}",
            note.id,
            note.surah_number,
            note.verse_number,
            note.updated_at.format("%Y-%m-%d %H:%M")
        );
        println!("      {}", note.content);
    }
    Ok(())
}

// ============================================================================
// Reading progress
// ============================================================================

pub async fn progress_show(state: &AppState) -> anyhow::Result<()> {
    let (store, _) = state.account_store().await?;
    match store.reading_progress().await? {
        Some(progress) => println!(
            "Surah {}, verse {} ({:.1}% of the surah), last read {}",
            progress.current_surah,
            progress.current_verse,
            progress.completion_percentage,
            progress.last_read_at.format("%Y-%m-%d %H:%M")
        ),
        None => println!("No reading progress recorded"),
    }
    Ok(())
}

pub async fn progress_set(state: &AppState, verse: VerseRef) -> anyhow::Result<()> {
    let (store, session) = state.account_store().await?;

    let total = state
        .content
        .fetch_chapters()
        .await
        .context("Failed to fetch chapter list")?
        .into_iter()
        .find(|c| c.id == verse.chapter())
        .map(|c| c.verses_count)
        .with_context(|| format!("Chapter {} not in chapter list", verse.chapter()))?;
    verse.within(total)?;

    let progress = ReadingProgress::at(session.user_id, verse, total);
    store.upsert_progress(&progress).await?;
    println!(
        "Progress set to {verse} ({:.1}%)",
        progress.completion_percentage
    );
    Ok(())
}

// ============================================================================
// Profile
// ============================================================================

pub async fn profile_show(state: &AppState) -> anyhow::Result<()> {
    let (store, session) = state.account_store().await?;
    let profile = store
        .get_profile()
        .await?
        .context("Profile not found")?;

    println!("Email:     {}", session.email);
    println!("User ID:   {}", profile.user_id);
    println!("Username:  {}", profile.username.as_deref().unwrap_or("-"));
    println!("Name:      {}", profile.full_name.as_deref().unwrap_or("-"));
    println!("Avatar:    {}", profile.avatar_url.as_deref().unwrap_or("-"));
    println!(
        "Roles:     {}",
        session
            .roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Verified:  {}", if profile.is_verified { "yes" } else { "no" });
    println!("Joined:    {}", profile.created_at.format("%Y-%m-%d"));
    Ok(())
}

pub async fn profile_update(state: &AppState, update: UpdateProfile) -> anyhow::Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass --username, --full-name or --avatar-url");
    }

    let (store, _) = state.account_store().await?;
    let profile = store.update_profile(update).await?;
    println!(
        "Profile updated: {} ({})",
        profile.full_name.as_deref().unwrap_or("-"),
        profile.username.as_deref().unwrap_or("-")
    );
    Ok(())
}
