/// Tilawah - Quran reader and listener
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tilawah_core::{TilawahError, UpdateProfile, VerseRef};
use tilawah_reader::{
    commands::{self, account, admin, content, ListenOptions},
    config::ReaderConfig,
    error::{core_message, ReaderError},
    state::{AppState, Credentials},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tilawah")]
#[command(about = "Read, search and listen to the Quran", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./tilawah.toml if present)
    #[arg(short, long, env = "TILAWAH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Account email for signed-in commands
    #[arg(long, env = "TILAWAH_EMAIL", global = true)]
    email: Option<String>,

    /// Account password for signed-in commands
    #[arg(long, env = "TILAWAH_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all chapters
    Chapters,
    /// Read a chapter with translation
    Read {
        /// Chapter number (1-114)
        chapter: u16,
        /// Start at this verse (recorded as reading progress when signed in)
        #[arg(long)]
        from: Option<u16>,
    },
    /// Show a single verse (e.g. 2:255)
    Verse {
        verse: VerseRef,
    },
    /// Full-text search
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show commentary for a verse
    Tafsir {
        verse: VerseRef,
    },
    /// List reciters
    Reciters {
        /// List audio editions (identifiers usable with `listen --reciter`)
        #[arg(long)]
        audio: bool,
    },
    /// Recite a chapter verse by verse
    Listen {
        /// Chapter number (1-114)
        chapter: u16,
        /// First verse to recite
        #[arg(long, default_value_t = 1)]
        from: u16,
        /// Audio edition identifier (e.g. ar.alafasy)
        #[arg(long)]
        reciter: Option<String>,
        /// Stop after the first verse instead of advancing
        #[arg(long)]
        no_advance: bool,
    },
    /// Create an account with --email and --password
    Register {
        /// Display name
        #[arg(long)]
        full_name: String,
        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Manage bookmarks
    #[command(subcommand)]
    Bookmark(BookmarkCommand),
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
    /// Reading progress
    #[command(subcommand)]
    Progress(ProgressCommand),
    /// Your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Administration (admin role required)
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum BookmarkCommand {
    /// Bookmark a verse
    Add { verse: VerseRef },
    /// List bookmarks, newest first
    List,
    /// Remove a bookmark by ID
    Remove { id: String },
}

#[derive(Subcommand)]
enum NoteCommand {
    /// Add a note to a verse
    Add { verse: VerseRef, content: String },
    /// Replace a note's content
    Edit { id: String, content: String },
    /// Delete a note
    Delete { id: String },
    /// List notes, newest first
    List {
        /// Only notes on this verse
        #[arg(long)]
        verse: Option<VerseRef>,
    },
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// Show the last read position
    Show,
    /// Record a verse as the last read position
    Set { verse: VerseRef },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show your profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List users with profiles and roles
    Users,
    /// Ban a user
    Ban {
        user_id: String,
        #[arg(long)]
        reason: String,
    },
    /// Lift a ban
    Unban { user_id: String },
    /// Replace a user's role (admin, moderator, user)
    Role { user_id: String, role: String },
    /// User, bookmark and note counts
    Stats,
    /// Recent activity
    Logs {
        /// Number of entries (default 50)
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tilawah=info,tilawah_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", describe(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ReaderConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let credentials = Credentials::from_args(cli.email, cli.password);
    let state = AppState::new(config, credentials)?;

    match cli.command {
        Commands::Chapters => content::chapters(&state).await,
        Commands::Read { chapter, from } => content::read(&state, chapter, from).await,
        Commands::Verse { verse } => content::verse(&state, verse).await,
        Commands::Search { query } => content::search(&state, &query.join(" ")).await,
        Commands::Tafsir { verse } => content::tafsir(&state, verse).await,
        Commands::Reciters { audio } => content::reciters(&state, audio).await,
        Commands::Listen {
            chapter,
            from,
            reciter,
            no_advance,
        } => {
            let options = ListenOptions {
                chapter,
                from,
                reciter,
                no_advance,
            };
            commands::listen::listen(&state, options).await
        }
        Commands::Register {
            full_name,
            confirm_password,
        } => account::register(&state, &full_name, confirm_password.as_deref()).await,
        Commands::Bookmark(command) => match command {
            BookmarkCommand::Add { verse } => account::bookmark_add(&state, verse).await,
            BookmarkCommand::List => account::bookmark_list(&state).await,
            BookmarkCommand::Remove { id } => account::bookmark_remove(&state, &id).await,
        },
        Commands::Note(command) => match command {
            NoteCommand::Add { verse, content } => account::note_add(&state, verse, content).await,
            NoteCommand::Edit { id, content } => account::note_edit(&state, &id, &content).await,
            NoteCommand::Delete { id } => account::note_delete(&state, &id).await,
            NoteCommand::List { verse } => account::note_list(&state, verse).await,
        },
        Commands::Progress(command) => match command {
            ProgressCommand::Show => account::progress_show(&state).await,
            ProgressCommand::Set { verse } => account::progress_set(&state, verse).await,
        },
        Commands::Profile(command) => match command {
            ProfileCommand::Show => account::profile_show(&state).await,
            ProfileCommand::Update {
                username,
                full_name,
                avatar_url,
            } => {
                let update = UpdateProfile {
                    username,
                    full_name,
                    avatar_url,
                };
                account::profile_update(&state, update).await
            }
        },
        Commands::Admin(command) => match command {
            AdminCommand::Users => admin::users(&state).await,
            AdminCommand::Ban { user_id, reason } => admin::ban(&state, &user_id, &reason).await,
            AdminCommand::Unban { user_id } => admin::unban(&state, &user_id).await,
            AdminCommand::Role { user_id, role } => {
                admin::change_role(&state, &user_id, &role).await
            }
            AdminCommand::Stats => admin::stats(&state).await,
            AdminCommand::Logs { limit } => admin::logs(&state, limit).await,
        },
    }
}

/// Terminal message for a failed command
///
/// Validation and permission errors are shown as-is; network and database
/// failures get a short summary (details are in the debug log).
fn describe(error: &anyhow::Error) -> String {
    if let Some(e) = error.downcast_ref::<ReaderError>() {
        return e.user_message();
    }
    if let Some(e) = error.downcast_ref::<TilawahError>() {
        return core_message(e);
    }
    format!("{error:#}")
}
