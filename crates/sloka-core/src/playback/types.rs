//! Playback vocabulary shared by the orchestrator, the driver and engines.

use crate::error::{SlokaError, SlokaResult};
use crate::verse::Verse;
use crate::voice_manager::VoiceDescriptor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Silence the engine inserts before each utterance
pub const PRE_UTTERANCE_DELAY: Duration = Duration::from_millis(100);
/// Silence the engine inserts after each utterance
pub const POST_UTTERANCE_DELAY: Duration = Duration::from_millis(300);
/// Gap between the Devanagari and English phases of [`RenderingMode::Both`]
pub const INTER_PHASE_DELAY: Duration = Duration::from_millis(500);
/// Gap between two repeats of the whole phase sequence
pub const INTER_REPEAT_DELAY: Duration = Duration::from_millis(800);

/// Caller-selected rendering style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderingMode {
    /// Devanagari converted to romanized phonetic text, read by an English voice
    #[default]
    RomanizedPhonetic,
    /// Cleaned IAST transliteration
    Transliteration,
    /// Raw Devanagari script
    Devanagari,
    /// English meaning
    English,
    /// Devanagari, then English
    Both,
}

impl RenderingMode {
    /// Every mode, in menu order
    pub const ALL: [Self; 5] = [
        Self::RomanizedPhonetic,
        Self::Transliteration,
        Self::Devanagari,
        Self::English,
        Self::Both,
    ];

    /// Phases spoken in one full cycle, in order
    #[must_use]
    pub const fn phases(self) -> &'static [Phase] {
        match self {
            Self::RomanizedPhonetic => &[Phase::Romanized],
            Self::Transliteration => &[Phase::Transliteration],
            Self::Devanagari => &[Phase::Devanagari],
            Self::English => &[Phase::English],
            Self::Both => &[Phase::Devanagari, Phase::English],
        }
    }

    /// First phase of every cycle
    #[must_use]
    pub const fn entry_phase(self) -> Phase {
        match self {
            Self::RomanizedPhonetic => Phase::Romanized,
            Self::Devanagari | Self::Both => Phase::Devanagari,
            Self::Transliteration => Phase::Transliteration,
            Self::English => Phase::English,
        }
    }

    /// Whether the raw Devanagari script is spoken
    #[must_use]
    pub const fn uses_devanagari(self) -> bool {
        matches!(self, Self::Devanagari | Self::Both)
    }

    /// Whether the IAST transliteration is spoken
    #[must_use]
    pub const fn uses_transliteration(self) -> bool {
        matches!(self, Self::Transliteration)
    }

    /// Whether the English meaning is spoken
    #[must_use]
    pub const fn uses_english(self) -> bool {
        matches!(self, Self::English | Self::Both)
    }

    /// Stable machine name, as used in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RomanizedPhonetic => "romanized-phonetic",
            Self::Transliteration => "transliteration",
            Self::Devanagari => "devanagari",
            Self::English => "english",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for RenderingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RomanizedPhonetic => write!(f, "Romanized Phonetic"),
            Self::Transliteration => write!(f, "Transliteration (IAST)"),
            Self::Devanagari => write!(f, "Sanskrit (Devanagari)"),
            Self::English => write!(f, "English Meaning"),
            Self::Both => write!(f, "Sanskrit + English"),
        }
    }
}

impl std::str::FromStr for RenderingMode {
    type Err = SlokaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "romanized-phonetic" | "romanized" | "phonetic" => Ok(Self::RomanizedPhonetic),
            "transliteration" | "iast" => Ok(Self::Transliteration),
            "devanagari" | "sanskrit" => Ok(Self::Devanagari),
            "english" | "meaning" => Ok(Self::English),
            "both" => Ok(Self::Both),
            other => Err(SlokaError::invalid_input(format!(
                "Unknown rendering mode '{other}'"
            ))),
        }
    }
}

/// Which text variant is being spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Romanized phonetic rendering of the Devanagari
    Romanized,
    /// Raw Devanagari script
    Devanagari,
    /// Cleaned IAST transliteration
    Transliteration,
    /// English meaning
    English,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Romanized => write!(f, "Romanized"),
            Self::Devanagari => write!(f, "Devanagari"),
            Self::Transliteration => write!(f, "Transliteration"),
            Self::English => write!(f, "English"),
        }
    }
}

/// The two fixed speech-rate tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechRate {
    /// Normal listening pace
    #[default]
    Normal,
    /// Slow pace for learning pronunciation
    Slow,
}

impl SpeechRate {
    /// Pick the tier for a slow-speed flag
    #[must_use]
    pub const fn from_slow_speed(slow_speed: bool) -> Self {
        if slow_speed {
            Self::Slow
        } else {
            Self::Normal
        }
    }

    /// Rate on the engine's normalised 0.0..=1.0 scale, where 0.5 is the engine default
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::Normal => 0.375,
            Self::Slow => 0.25,
        }
    }

    /// How much longer speech takes at this rate than at [`SpeechRate::Normal`]
    #[must_use]
    pub fn duration_scale(self) -> f32 {
        Self::Normal.value() / self.value()
    }
}

/// Identifies one playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Identifies one speak request handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtteranceId(pub u64);

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

/// Identifies one scheduled inter-phase or inter-repeat delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelayTicket {
    /// Session the delay belongs to
    pub session: SessionId,
    /// Per-orchestrator sequence number
    pub sequence: u64,
}

/// One utterance handed to the speech engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakRequest {
    /// Utterance identifier, echoed back in engine events
    pub id: UtteranceId,
    /// Owning session
    pub session: SessionId,
    /// Phase this utterance speaks
    pub phase: Phase,
    /// Text payload
    pub text: String,
    /// Chosen voice, or `None` to let the engine use its default
    pub voice: Option<VoiceDescriptor>,
    /// Speech rate tier
    pub rate: SpeechRate,
    /// Pitch multiplier
    pub pitch: f32,
    /// Volume multiplier
    pub volume: f32,
    /// Silence before the utterance
    pub pre_delay: Duration,
    /// Silence after the utterance
    pub post_delay: Duration,
}

/// A caller's request to play one verse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    devanagari: String,
    transliteration: String,
    english: String,
    mode: RenderingMode,
    repeats: u32,
    slow_speed: bool,
}

impl PlaybackRequest {
    /// Create a single-repeat, normal-speed request
    #[must_use]
    pub fn new(
        devanagari: impl Into<String>,
        transliteration: impl Into<String>,
        english: impl Into<String>,
        mode: RenderingMode,
    ) -> Self {
        Self {
            devanagari: devanagari.into(),
            transliteration: transliteration.into(),
            english: english.into(),
            mode,
            repeats: 1,
            slow_speed: false,
        }
    }

    /// Create a request for a verse record
    #[must_use]
    pub fn for_verse(verse: &Verse, mode: RenderingMode) -> Self {
        Self::new(
            verse.devanagari.clone(),
            verse.transliteration.clone(),
            verse.meaning.clone(),
            mode,
        )
    }

    /// Set how many full cycles to play
    ///
    /// # Errors
    ///
    /// Returns an error if `repeats` is zero
    pub fn with_repeats(mut self, repeats: u32) -> SlokaResult<Self> {
        if repeats == 0 {
            return Err(SlokaError::invalid_input("Repeats must be at least 1"));
        }
        self.repeats = repeats;
        Ok(self)
    }

    /// Select the slow speech-rate tier
    #[must_use]
    pub fn with_slow_speed(mut self, slow_speed: bool) -> Self {
        self.slow_speed = slow_speed;
        self
    }

    /// Raw Devanagari script
    #[must_use]
    pub fn devanagari(&self) -> &str {
        &self.devanagari
    }

    /// Raw IAST transliteration
    #[must_use]
    pub fn transliteration(&self) -> &str {
        &self.transliteration
    }

    /// English meaning
    #[must_use]
    pub fn english(&self) -> &str {
        &self.english
    }

    /// Rendering mode
    #[must_use]
    pub const fn mode(&self) -> RenderingMode {
        self.mode
    }

    /// Number of full cycles, always at least 1
    #[must_use]
    pub const fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Whether the slow rate tier is selected
    #[must_use]
    pub const fn slow_speed(&self) -> bool {
        self.slow_speed
    }
}
