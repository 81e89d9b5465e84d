//! `listen`: recite a chapter verse by verse

use crate::commands::content::{print_chapter_header, print_verse};
use crate::output::TranscriptOutput;
use crate::state::AppState;
use anyhow::Context;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tilawah_core::{AudioApi, ChapterContent};
use tilawah_playback::{
    AudioOutput, ChapterLoader, PlaybackEvent, PlaybackSequencer, PlaybackState, ProgressReporter,
};
use tilawah_storage::LocalAccountStore;
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ListenOptions {
    pub chapter: u16,
    pub from: u16,
    pub reciter: Option<String>,
    pub no_advance: bool,
}

pub async fn listen(state: &AppState, options: ListenOptions) -> anyhow::Result<()> {
    let loader = ChapterLoader::new(Arc::clone(&state.content));
    let Some(content) = loader
        .load(options.chapter)
        .await
        .with_context(|| format!("Failed to load chapter {}", options.chapter))?
    else {
        return Ok(());
    };

    let mut playback = state.config.playback_config();
    if let Some(reciter) = options.reciter {
        playback.reciter = reciter;
    }
    if options.no_advance {
        playback.auto_advance = false;
    }

    let audio_api: Arc<dyn AudioApi> = state.audio.clone();
    let output = TranscriptOutput::new(state.config.verse_duration());
    let mut sequencer = PlaybackSequencer::new(audio_api, output, playback);

    if let Some((pool, session)) = state.optional_session().await? {
        let store = LocalAccountStore::for_session(pool, &session);
        sequencer.set_progress_reporter(ProgressReporter::new(Arc::new(store)), session);
    }

    sequencer.load_chapter(options.chapter, content.total_verses())?;
    print_chapter_header(&content.chapter);
    println!("Reciter: {}\n", sequencer.reciter());

    sequencer.play(options.from).await?;
    run_until_stopped(&mut sequencer, &content).await?;

    info!(
        chapter = options.chapter,
        verses = sequencer.output().opened(),
        "Listening finished"
    );
    Ok(())
}

/// Drive the sequencer until playback stops or the user presses Ctrl-C
pub async fn run_until_stopped<O: AudioOutput>(
    sequencer: &mut PlaybackSequencer<O>,
    content: &ChapterContent,
) -> anyhow::Result<()> {
    run_until_interrupted(sequencer, content, tokio::signal::ctrl_c()).await
}

/// Drive the sequencer until playback stops or `interrupt` resolves
///
/// The interrupt is raced against both the poll delay and the completion
/// check, so it is honoured while the next verse's audio is being resolved.
pub async fn run_until_interrupted<O, F>(
    sequencer: &mut PlaybackSequencer<O>,
    content: &ChapterContent,
    interrupt: F,
) -> anyhow::Result<()>
where
    O: AudioOutput,
    F: Future,
{
    tokio::pin!(interrupt);

    loop {
        for event in sequencer.drain_events() {
            print_event(&event, content);
        }

        if sequencer.state() == PlaybackState::Stopped {
            break;
        }

        let interrupted = tokio::select! {
            _ = &mut interrupt => true,
            () = tokio::time::sleep(POLL_INTERVAL) => false,
        };
        let interrupted = interrupted
            || tokio::select! {
                _ = &mut interrupt => true,
                result = sequencer.poll_completion() => {
                    result?;
                    false
                }
            };

        if interrupted {
            sequencer.stop();
            println!("\nStopped");
            break;
        }
    }

    for event in sequencer.drain_events() {
        print_event(&event, content);
    }
    Ok(())
}

fn print_event(event: &PlaybackEvent, content: &ChapterContent) {
    match event {
        PlaybackEvent::VerseStarted { verse } => match content.verse(verse.verse()) {
            Some(loaded) => print_verse(loaded, ">"),
            None => println!(">[{verse}]"),
        },
        PlaybackEvent::AudioUnavailable { verse } => {
            println!("No recitation available for {verse}");
        }
        PlaybackEvent::ChapterFinished { chapter } => {
            println!("\nCompleted surah {chapter}");
        }
        PlaybackEvent::VerseFinished { verse } => debug!(verse = %verse, "Verse finished"),
        PlaybackEvent::StateChanged { state } => debug!(?state, "Playback state changed"),
    }
}
