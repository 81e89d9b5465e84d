/// Reader configuration
use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tilawah_content_client::{
    ContentConfig, DEFAULT_AUDIO_API_URL, DEFAULT_QURAN_API_URL, DEFAULT_TAFSIR_ID,
    DEFAULT_TRANSLATION_ID,
};
use tilawah_playback::{PlaybackConfig, DEFAULT_RECITER};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tilawah.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    #[serde(default = "default_content")]
    pub content: ContentSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentSettings {
    #[serde(default = "default_quran_api_url")]
    pub quran_api_url: String,

    #[serde(default = "default_audio_api_url")]
    pub audio_api_url: String,

    #[serde(default = "default_translation_id")]
    pub translation_id: u32,

    #[serde(default = "default_tafsir_id")]
    pub tafsir_id: u32,

    #[serde(default = "default_reciter")]
    pub reciter: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Account promoted to admin on sign-in while no admin exists
    #[serde(default)]
    pub admin_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,

    /// How long the transcript output "plays" each verse
    #[serde(default = "default_verse_duration_ms")]
    pub verse_duration_ms: u64,
}

impl ReaderConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `tilawah.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (e.g. TILAWAH_STORAGE__DATABASE_URL)
        settings = settings.add_source(
            config::Environment::with_prefix("TILAWAH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ReaderError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ReaderError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("content.quran_api_url", &self.content.quran_api_url),
            ("content.audio_api_url", &self.content.audio_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ReaderError::Config(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }

        if self.content.reciter.trim().is_empty() {
            return Err(ReaderError::Config("content.reciter is required".to_string()));
        }

        if self.content.timeout_secs == 0 {
            return Err(ReaderError::Config(
                "content.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(ReaderError::Config(format!(
                "storage.database_url must be a sqlite URL, got {:?}",
                self.storage.database_url
            )));
        }

        if self.playback.verse_duration_ms == 0 {
            return Err(ReaderError::Config(
                "playback.verse_duration_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the content API clients
    pub fn content_config(&self) -> ContentConfig {
        ContentConfig {
            quran_api_url: self.content.quran_api_url.clone(),
            audio_api_url: self.content.audio_api_url.clone(),
            translation_id: self.content.translation_id,
            tafsir_id: self.content.tafsir_id,
            timeout_secs: self.content.timeout_secs,
        }
    }

    /// Settings for the playback sequencer
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            reciter: self.content.reciter.clone(),
            auto_advance: self.playback.auto_advance,
        }
    }

    pub fn verse_duration(&self) -> Duration {
        Duration::from_millis(self.playback.verse_duration_ms)
    }

    /// Whether `email` is the configured admin account
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.storage
            .admin_email
            .as_deref()
            .is_some_and(|admin| admin.trim().eq_ignore_ascii_case(email.trim()))
    }
}

// Default values
fn default_content() -> ContentSettings {
    ContentSettings {
        quran_api_url: default_quran_api_url(),
        audio_api_url: default_audio_api_url(),
        translation_id: default_translation_id(),
        tafsir_id: default_tafsir_id(),
        reciter: default_reciter(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_quran_api_url() -> String {
    DEFAULT_QURAN_API_URL.to_string()
}

fn default_audio_api_url() -> String {
    DEFAULT_AUDIO_API_URL.to_string()
}

fn default_translation_id() -> u32 {
    DEFAULT_TRANSLATION_ID
}

fn default_tafsir_id() -> u32 {
    DEFAULT_TAFSIR_ID
}

fn default_reciter() -> String {
    DEFAULT_RECITER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        admin_email: None,
    }
}

fn default_database_url() -> String {
    "sqlite://tilawah.db".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        auto_advance: default_auto_advance(),
        verse_duration_ms: default_verse_duration_ms(),
    }
}

fn default_auto_advance() -> bool {
    true
}

fn default_verse_duration_ms() -> u64 {
    1500
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            storage: default_storage(),
            playback: default_playback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ReaderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.content.translation_id, 131);
        assert_eq!(config.content.tafsir_id, 169);
        assert_eq!(config.content.reciter, "ar.alafasy");
        assert!(config.playback.auto_advance);
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[content]
translation_id = 20
reciter = "ar.husary"

[storage]
database_url = "sqlite://custom.db"
admin_email = "admin@example.com"

[playback]
auto_advance = false
"#
        )
        .unwrap();

        let config = ReaderConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.content.translation_id, 20);
        assert_eq!(config.content.reciter, "ar.husary");
        assert_eq!(config.content.tafsir_id, 169);
        assert_eq!(config.content.quran_api_url, DEFAULT_QURAN_API_URL);
        assert_eq!(config.storage.database_url, "sqlite://custom.db");
        assert!(!config.playback.auto_advance);
        assert_eq!(config.playback.verse_duration_ms, 1500);

        assert!(config.is_admin_email("Admin@Example.com"));
        assert!(!config.is_admin_email("reader@example.com"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ReaderConfig::load(Some(Path::new("/nonexistent/tilawah.toml")));
        assert!(matches!(result, Err(ReaderError::Config(_))));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = ReaderConfig::default();
        config.content.quran_api_url = "api.quran.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ReaderConfig::default();
        config.content.reciter = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ReaderConfig::default();
        config.storage.database_url = "postgres://localhost/tilawah".to_string();
        assert!(config.validate().is_err());

        let mut config = ReaderConfig::default();
        config.playback.verse_duration_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn derived_client_settings() {
        let mut config = ReaderConfig::default();
        config.content.reciter = "ar.minshawi".to_string();
        config.playback.verse_duration_ms = 250;

        let content = config.content_config();
        assert_eq!(content.translation_id, 131);
        assert_eq!(content.timeout_secs, 30);

        let playback = config.playback_config();
        assert_eq!(playback.reciter, "ar.minshawi");
        assert!(playback.auto_advance);
        assert_eq!(config.verse_duration(), Duration::from_millis(250));
    }
}
