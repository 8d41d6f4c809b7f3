//! Listener preferences and the voices seeded into a static catalog.
//!
//! ```toml
//! [playback]
//! mode = "both"
//! repeat_count = 3
//! slow_speed = true
//!
//! [[voices]]
//! id = "com.apple.voice.enhanced.hi-IN.Lekha"
//! name = "Lekha"
//! language = "hi-IN"
//! quality = "enhanced"
//! ```

use crate::error::{SlokaError, SlokaResult};
use crate::playback::{PlaybackRequest, RenderingMode};
use crate::verse::Verse;
use crate::voice_manager::{StaticVoiceCatalog, VoiceDescriptor};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Repeat counts the listener may choose
pub const REPEAT_COUNT_RANGE: RangeInclusive<u32> = 1..=5;

/// Stored playback preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPreferences {
    /// Rendering mode
    pub mode: RenderingMode,
    /// Full cycles per play request
    pub repeat_count: u32,
    /// Use the slow rate tier
    pub slow_speed: bool,
}

impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            mode: RenderingMode::RomanizedPhonetic,
            repeat_count: 1,
            slow_speed: false,
        }
    }
}

impl PlaybackPreferences {
    /// Validate the preference values
    ///
    /// # Errors
    ///
    /// Returns an error if `repeat_count` is outside [`REPEAT_COUNT_RANGE`]
    pub fn validate(&self) -> SlokaResult<()> {
        if !REPEAT_COUNT_RANGE.contains(&self.repeat_count) {
            return Err(SlokaError::configuration(format!(
                "Repeat count must be between {} and {}, got {}",
                REPEAT_COUNT_RANGE.start(),
                REPEAT_COUNT_RANGE.end(),
                self.repeat_count
            )));
        }
        Ok(())
    }

    /// Build a playback request for `verse` using these preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences are invalid
    pub fn request_for(&self, verse: &Verse) -> SlokaResult<PlaybackRequest> {
        self.validate()?;
        Ok(PlaybackRequest::for_verse(verse, self.mode)
            .with_repeats(self.repeat_count)?
            .with_slow_speed(self.slow_speed))
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlokaConfig {
    /// Playback preference
    pub playback: PlaybackPreferences,
    /// Voices for the static catalog, in preference order
    pub voices: Vec<VoiceDescriptor>,
}

impl SlokaConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid
    pub fn from_toml_str(contents: &str) -> SlokaResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid
    pub fn load(path: &Path) -> SlokaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            SlokaError::file(format!("Failed to read {}: {err}", path.display()))
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), voices = config.voices.len(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path`, or the default location; fall back to defaults when no file exists
    ///
    /// An explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid
    pub fn load_or_default(path: Option<&Path>) -> SlokaResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config_dir>/sloka/config.toml` for the current platform
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "Sloka", "sloka").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns an error if preferences are out of range or a voice entry is incomplete
    pub fn validate(&self) -> SlokaResult<()> {
        self.playback.validate()?;
        for (index, voice) in self.voices.iter().enumerate() {
            if voice.id.trim().is_empty() {
                return Err(SlokaError::configuration(format!(
                    "Voice #{} has an empty id",
                    index + 1
                )));
            }
            if voice.language.trim().is_empty() {
                return Err(SlokaError::configuration(format!(
                    "Voice '{}' has an empty language",
                    voice.id
                )));
            }
        }
        Ok(())
    }

    /// Catalog holding the configured voices, in file order
    #[must_use]
    pub fn catalog(&self) -> StaticVoiceCatalog {
        StaticVoiceCatalog::with_voices(self.voices.clone())
    }

    /// Serialize back to TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_toml_string(&self) -> SlokaResult<String> {
        toml::to_string_pretty(self)
            .map_err(|err| SlokaError::configuration(format!("Failed to serialize config: {err}")))
    }
}
