//! Tilawah Content Client
//!
//! HTTP clients for the public, read-only Quran content APIs.
//!
//! # Features
//!
//! - **Text** (Quran.com v4): chapters, verses with translations, search,
//!   tafsir, recitation resources
//! - **Audio** (AlQuran.cloud v1): per-verse and per-chapter recitation URLs,
//!   audio editions
//!
//! Both clients implement the core collaborator traits (`ContentApi`,
//! `AudioApi`) so readers and the playback sequencer never see HTTP.
//!
//! # Example
//!
//! ```ignore
//! use tilawah_content_client::{AlQuranCloudClient, ContentConfig, QuranComClient};
//! use tilawah_core::VerseRef;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContentConfig::default();
//!     let text = QuranComClient::new(&config)?;
//!     let audio = AlQuranCloudClient::new(&config)?;
//!
//!     let verse = text.get_verse(VerseRef::new(2, 255)?).await?;
//!     println!("{}", verse.text_uthmani);
//!
//!     let url = audio.verse_audio_url(VerseRef::new(2, 255)?, "ar.alafasy").await?;
//!     println!("{url:?}");
//!     Ok(())
//! }
//! ```

mod alquran_cloud;
mod error;
mod http;
mod quran_com;
mod types;

pub use alquran_cloud::AlQuranCloudClient;
pub use error::{ContentClientError, Result};
pub use quran_com::QuranComClient;
pub use types::{
    ContentConfig, DEFAULT_AUDIO_API_URL, DEFAULT_QURAN_API_URL, DEFAULT_TAFSIR_ID,
    DEFAULT_TRANSLATION_ID,
};
