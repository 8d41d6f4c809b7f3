//! Voice descriptors and the catalog the host platform exposes.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Quality tier reported by the platform for a voice
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VoiceQuality {
    /// Tier the platform did not report
    #[default]
    Unknown,
    /// Compact default voice
    Default,
    /// Enhanced download
    Enhanced,
    /// Premium download
    Premium,
}

impl VoiceQuality {
    /// Ranking score (premium=3, enhanced=2, default=1, unknown=0)
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Default => 1,
            Self::Enhanced => 2,
            Self::Premium => 3,
        }
    }
}

impl std::fmt::Display for VoiceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Default => write!(f, "Default"),
            Self::Enhanced => write!(f, "Enhanced"),
            Self::Premium => write!(f, "Premium"),
        }
    }
}

/// A voice offered by the host's speech subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Platform identifier
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// BCP-47 language tag (e.g., "hi-IN", "en-US")
    pub language: String,
    /// Quality tier
    #[serde(default)]
    pub quality: VoiceQuality,
}

impl VoiceDescriptor {
    /// Create a new voice descriptor
    #[must_use]
    pub fn new(id: impl Into<String>, language: impl Into<String>, quality: VoiceQuality) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            language: language.into(),
            quality,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check whether the language tag starts with `prefix`, ignoring case
    #[must_use]
    pub fn matches_language_prefix(&self, prefix: &str) -> bool {
        self.language
            .get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    }
}

/// Read-only view of the voices a host can synthesize with.
///
/// Implementations must keep [`VoiceCatalog::voices`] in a stable order;
/// selection breaks quality ties by that order.
pub trait VoiceCatalog: Send + Sync + std::fmt::Debug {
    /// All voices, in catalog order
    fn voices(&self) -> Vec<VoiceDescriptor>;

    /// Look a voice up by its platform identifier
    fn voice(&self, identifier: &str) -> Option<VoiceDescriptor> {
        self.voices().into_iter().find(|voice| voice.id == identifier)
    }

    /// The platform's generic voice for a language tag, if it has one
    fn system_voice(&self, _language: &str) -> Option<VoiceDescriptor> {
        None
    }
}

/// In-memory catalog, for hosts without a platform catalog and for tests
#[derive(Debug, Clone, Default)]
pub struct StaticVoiceCatalog {
    voices: Arc<Vec<VoiceDescriptor>>,
    system_defaults: Arc<Vec<(String, VoiceDescriptor)>>,
}

impl StaticVoiceCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with custom voices, kept in the given order
    #[must_use]
    pub fn with_voices(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            voices: Arc::new(voices),
            system_defaults: Arc::default(),
        }
    }

    /// Register the generic voice returned for an exact language tag
    #[must_use]
    pub fn with_system_default(
        mut self,
        language: impl Into<String>,
        voice: VoiceDescriptor,
    ) -> Self {
        Arc::make_mut(&mut self.system_defaults).push((language.into(), voice));
        self
    }

    /// Voices whose language tag starts with `prefix`, in catalog order
    #[must_use]
    pub fn voices_by_language(&self, prefix: &str) -> Vec<VoiceDescriptor> {
        self.voices
            .iter()
            .filter(|voice| voice.matches_language_prefix(prefix))
            .cloned()
            .collect()
    }

    /// Get voice count
    #[must_use]
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Get supported languages, sorted and deduplicated
    #[must_use]
    pub fn supported_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .voices
            .iter()
            .map(|voice| voice.language.clone())
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }
}

impl VoiceCatalog for StaticVoiceCatalog {
    fn voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.as_ref().clone()
    }

    fn voice(&self, identifier: &str) -> Option<VoiceDescriptor> {
        self.voices.iter().find(|voice| voice.id == identifier).cloned()
    }

    fn system_voice(&self, language: &str) -> Option<VoiceDescriptor> {
        self.system_defaults
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(language))
            .map(|(_, voice)| voice.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> StaticVoiceCatalog {
        StaticVoiceCatalog::with_voices(vec![
            VoiceDescriptor::new("hi.lekha", "hi-IN", VoiceQuality::Enhanced).with_name("Lekha"),
            VoiceDescriptor::new("en.samantha", "en-US", VoiceQuality::Default),
            VoiceDescriptor::new("en.rishi", "en-IN", VoiceQuality::Premium),
        ])
    }

    #[test]
    fn test_quality_ordering_and_scores() {
        assert!(VoiceQuality::Premium > VoiceQuality::Enhanced);
        assert!(VoiceQuality::Enhanced > VoiceQuality::Default);
        assert!(VoiceQuality::Default > VoiceQuality::Unknown);
        assert_eq!(VoiceQuality::Premium.score(), 3);
        assert_eq!(VoiceQuality::Unknown.score(), 0);
        assert_eq!(VoiceQuality::Enhanced.to_string(), "Enhanced");
    }

    #[test]
    fn test_language_prefix_matching() {
        let voice = VoiceDescriptor::new("x", "en-IN", VoiceQuality::Default);
        assert!(voice.matches_language_prefix("en"));
        assert!(voice.matches_language_prefix("EN-in"));
        assert!(!voice.matches_language_prefix("en-US"));
        assert!(!voice.matches_language_prefix("en-IN-x"));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.voice_count(), 3);
        assert_eq!(catalog.voice("hi.lekha").map(|v| v.name), Some("Lekha".to_string()));
        assert!(catalog.voice("missing").is_none());
    }

    #[test]
    fn test_voices_by_language_keeps_order() {
        let catalog = sample_catalog();
        let english: Vec<String> = catalog
            .voices_by_language("en")
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(english, vec!["en.samantha", "en.rishi"]);
    }

    #[test]
    fn test_supported_languages() {
        assert_eq!(
            sample_catalog().supported_languages(),
            vec!["en-IN", "en-US", "hi-IN"]
        );
    }

    #[test]
    fn test_system_defaults() {
        let fallback = VoiceDescriptor::new("system.hi", "hi-IN", VoiceQuality::Default);
        let catalog = StaticVoiceCatalog::new().with_system_default("hi-IN", fallback.clone());
        assert_eq!(catalog.system_voice("hi-in"), Some(fallback));
        assert_eq!(catalog.system_voice("en-US"), None);
    }

    #[test]
    fn test_descriptor_serialization() {
        let voice = VoiceDescriptor::new("v", "hi-IN", VoiceQuality::Premium);
        let json = serde_json::to_string(&voice).expect("Should serialize");
        assert!(json.contains("\"premium\""));
        let parsed: VoiceDescriptor = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(parsed, voice);
    }
}
