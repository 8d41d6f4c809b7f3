//! Verse records and the per-session text bundle derived from them.

use crate::playback::Phase;
use crate::transliteration::{clean_iast, romanize};
use serde::{Deserialize, Serialize};

/// One verse as handed over by the verse store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Stable identifier (e.g., "2.47")
    pub id: String,
    /// Chapter number
    pub chapter: u32,
    /// Verse number within the chapter
    pub verse: u32,
    /// Devanagari script
    pub devanagari: String,
    /// IAST transliteration
    pub transliteration: String,
    /// English meaning
    pub meaning: String,
    /// Topic label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Longer commentary
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
}

impl Verse {
    /// Human-readable reference, e.g. "BG 2.47"
    #[must_use]
    pub fn reference(&self) -> String {
        format!("BG {}.{}", self.chapter, self.verse)
    }
}

/// Text variants for one playback session, converted once up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseText {
    devanagari: String,
    transliteration: String,
    english: String,
    romanized: String,
}

impl VerseText {
    /// Run the transliteration engine over the raw fields
    #[must_use]
    pub fn prepare(devanagari: &str, transliteration: &str, english: &str) -> Self {
        Self {
            devanagari: devanagari.to_owned(),
            transliteration: clean_iast(transliteration),
            english: english.to_owned(),
            romanized: romanize(devanagari),
        }
    }

    /// Payload spoken during `phase`
    #[must_use]
    pub fn text_for(&self, phase: Phase) -> &str {
        match phase {
            Phase::Romanized => &self.romanized,
            Phase::Devanagari => &self.devanagari,
            Phase::Transliteration => &self.transliteration,
            Phase::English => &self.english,
        }
    }

    /// Romanized phonetic form of the Devanagari
    #[must_use]
    pub fn romanized(&self) -> &str {
        &self.romanized
    }

    /// Cleaned transliteration
    #[must_use]
    pub fn cleaned_transliteration(&self) -> &str {
        &self.transliteration
    }
}
