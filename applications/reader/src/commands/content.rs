//! Browsing commands: chapters, reading, search, tafsir, reciters

use crate::state::AppState;
use anyhow::Context;
use std::collections::HashSet;
use std::sync::Arc;
use tilawah_core::navigator::navigator_items;
use tilawah_core::{AccountStore, AudioApi, Chapter, ContentApi, Verse, VerseRef};
use tilawah_playback::{ChapterLoader, ProgressReporter};
use tilawah_storage::LocalAccountStore;

pub async fn chapters(state: &AppState) -> anyhow::Result<()> {
    let chapters = state
        .content
        .fetch_chapters()
        .await
        .context("Failed to fetch chapters")?;

    for chapter in &chapters {
        println!(
            "{:>3}. {:<20} {:<24} {:>3} verses  {}",
            chapter.id,
            chapter.name_simple,
            translated_name(chapter),
            chapter.verses_count,
            chapter.revelation_place
        );
    }
    Ok(())
}

/// Print a chapter from `from` onwards and, when signed in, record the
/// position as reading progress
pub async fn read(state: &AppState, chapter: u16, from: Option<u16>) -> anyhow::Result<()> {
    let loader = ChapterLoader::new(Arc::clone(&state.content));
    let Some(content) = loader
        .load(chapter)
        .await
        .with_context(|| format!("Failed to load chapter {chapter}"))?
    else {
        return Ok(());
    };

    let total = content.total_verses();
    let start = VerseRef::new(chapter, from.unwrap_or(1))?.within(total)?;

    let session = state.optional_session().await?;
    let bookmarked: HashSet<u16> = match &session {
        Some((pool, session)) => LocalAccountStore::for_session(pool.clone(), session)
            .get_bookmarks()
            .await?
            .into_iter()
            .filter(|b| b.surah_number == chapter)
            .map(|b| b.verse_number)
            .collect(),
        None => HashSet::new(),
    };

    print_chapter_header(&content.chapter);
    println!("{}", navigator_line(total, start.verse()));
    println!();

    for verse in content
        .verses
        .iter()
        .filter(|v| v.verse_number >= start.verse())
    {
        let marker = if bookmarked.contains(&verse.verse_number) { "*" } else { " " };
        print_verse(verse, marker);
    }

    if let Some((pool, session)) = session {
        let store = LocalAccountStore::for_session(pool, &session);
        let reporter = ProgressReporter::new(Arc::new(store));
        if let Some(handle) = reporter.report(Some(&session), start, total) {
            handle.await.context("Progress task failed")?;
        }
    }
    Ok(())
}

pub async fn verse(state: &AppState, verse: VerseRef) -> anyhow::Result<()> {
    let fetched = state
        .content
        .fetch_verse(verse)
        .await
        .with_context(|| format!("Failed to fetch verse {verse}"))?;

    print_verse(&fetched, " ");
    Ok(())
}

pub async fn search(state: &AppState, query: &str) -> anyhow::Result<()> {
    let results = ContentApi::search(state.content.as_ref(), query)
        .await
        .context("Search failed")?;

    if results.is_empty() {
        println!("No results for {query:?}");
        return Ok(());
    }

    for result in &results {
        println!("[{}] {}", result.verse_key, strip_tags(&result.text));
        for translation in &result.translations {
            println!("      {}", strip_tags(&translation.text));
        }
    }
    println!("\n{} result(s)", results.len());
    Ok(())
}

pub async fn tafsir(state: &AppState, verse: VerseRef) -> anyhow::Result<()> {
    let tafsir = state
        .content
        .fetch_tafsir(verse)
        .await
        .with_context(|| format!("Failed to fetch tafsir for {verse}"))?;

    if let Some(name) = &tafsir.resource_name {
        println!("{name} on {verse}\n");
    }
    println!("{}", strip_tags(&tafsir.text));
    Ok(())
}

/// Recitations from the text API, or audio editions with `audio`
pub async fn reciters(state: &AppState, audio: bool) -> anyhow::Result<()> {
    if audio {
        let editions = state
            .audio
            .fetch_audio_editions()
            .await
            .context("Failed to fetch audio editions")?;
        for edition in editions {
            println!(
                "{:<24} {:<28} {}",
                edition.identifier, edition.english_name, edition.language
            );
        }
        return Ok(());
    }

    let reciters = state
        .content
        .fetch_reciters()
        .await
        .context("Failed to fetch reciters")?;
    for reciter in reciters {
        match reciter.style {
            Some(style) => println!("{:>4}. {} ({style})", reciter.id, reciter.reciter_name),
            None => println!("{:>4}. {}", reciter.id, reciter.reciter_name),
        }
    }
    Ok(())
}

pub(crate) fn print_chapter_header(chapter: &Chapter) {
    println!(
        "{}. {} ({}) - {}",
        chapter.id,
        chapter.name_simple,
        translated_name(chapter),
        chapter.name_arabic
    );
    println!(
        "{} verses, revealed in {}",
        chapter.verses_count, chapter.revelation_place
    );
}

pub(crate) fn print_verse(verse: &Verse, marker: &str) {
    println!("{marker}[{}] {}", verse.verse_key, verse.text_uthmani);
    if let Some(translation) = verse.translation() {
        println!("       {}", strip_tags(translation));
    }
}

fn translated_name(chapter: &Chapter) -> &str {
    chapter
        .translated_name
        .as_ref()
        .map_or("", |t| t.name.as_str())
}

/// Navigator row with the current verse bracketed, e.g. `1 2 [3] 4 5 ... 286`
pub fn navigator_line(total_verses: u16, current_verse: u16) -> String {
    navigator_items(total_verses)
        .iter()
        .map(|item| {
            if item.is_active(current_verse) {
                format!("[{}]", item.label())
            } else {
                item.label()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop HTML markup (search highlights, footnote tags, tafsir paragraphs)
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}
