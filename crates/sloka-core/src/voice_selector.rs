//! Picks one voice per rendering mode and phase.
//!
//! Lookup order per category: the preferred identifiers, then the
//! best-quality voice for the category's language prefix, then the
//! platform's generic voice for the language tag. Running out of all three
//! is not an error; the engine then uses its own default.

use crate::playback::{Phase, RenderingMode};
use crate::voice_manager::{VoiceCatalog, VoiceDescriptor};
use tracing::{debug, warn};

/// Logical voice family a phase is spoken with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceCategory {
    /// Hindi voices, for Devanagari script
    Hindi,
    /// Indian English voices, for IAST transliteration
    IndianEnglish,
    /// US English voices, for meaning and romanized text
    UsEnglish,
}

impl VoiceCategory {
    /// BCP-47 tag used for the system voice fallback
    #[must_use]
    pub const fn language_tag(self) -> &'static str {
        match self {
            Self::Hindi => "hi-IN",
            Self::IndianEnglish => "en-IN",
            Self::UsEnglish => "en-US",
        }
    }

    /// Prefix a catalog voice's language must start with
    #[must_use]
    pub const fn language_prefix(self) -> &'static str {
        match self {
            Self::Hindi => "hi",
            Self::IndianEnglish => "en-IN",
            Self::UsEnglish => "en-US",
        }
    }

    /// Known good voices, best first
    #[must_use]
    pub const fn preferred_identifiers(self) -> [&'static str; 3] {
        match self {
            Self::Hindi => [
                "com.apple.voice.premium.hi-IN.Lekha",
                "com.apple.voice.enhanced.hi-IN.Lekha",
                "com.apple.ttsbundle.Lekha-premium",
            ],
            Self::IndianEnglish => [
                "com.apple.voice.premium.en-IN.Sangeeta",
                "com.apple.voice.enhanced.en-IN.Sangeeta",
                "com.apple.ttsbundle.siri_Nicky_en-IN_compact",
            ],
            Self::UsEnglish => [
                "com.apple.voice.premium.en-US.Samantha",
                "com.apple.voice.enhanced.en-US.Samantha",
                "com.apple.ttsbundle.siri_Samantha_en-US_compact",
            ],
        }
    }
}

impl std::fmt::Display for VoiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hindi => write!(f, "Hindi"),
            Self::IndianEnglish => write!(f, "Indian English"),
            Self::UsEnglish => write!(f, "US English"),
        }
    }
}

/// Stateless voice chooser; the catalog is passed in on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceSelector;

impl VoiceSelector {
    /// Voice family for a mode and phase
    #[must_use]
    pub const fn category_for(mode: RenderingMode, phase: Phase) -> VoiceCategory {
        if matches!(mode, RenderingMode::RomanizedPhonetic) {
            return VoiceCategory::UsEnglish;
        }
        match phase {
            Phase::Devanagari => VoiceCategory::Hindi,
            Phase::Transliteration => VoiceCategory::IndianEnglish,
            Phase::English | Phase::Romanized => VoiceCategory::UsEnglish,
        }
    }

    /// Choose a voice for a mode and phase, or `None` for the engine default
    #[must_use]
    pub fn select(
        catalog: &dyn VoiceCatalog,
        mode: RenderingMode,
        phase: Phase,
    ) -> Option<VoiceDescriptor> {
        Self::best_for_category(catalog, Self::category_for(mode, phase))
    }

    /// Walk the fallback chain for one category
    #[must_use]
    pub fn best_for_category(
        catalog: &dyn VoiceCatalog,
        category: VoiceCategory,
    ) -> Option<VoiceDescriptor> {
        if let Some(voice) = category
            .preferred_identifiers()
            .iter()
            .find_map(|identifier| catalog.voice(identifier))
        {
            debug!(category = %category, voice = %voice.id, "Using preferred voice");
            return Some(voice);
        }

        let mut candidates: Vec<VoiceDescriptor> = catalog
            .voices()
            .into_iter()
            .filter(|voice| voice.matches_language_prefix(category.language_prefix()))
            .collect();
        // stable: equal tiers keep catalog order
        candidates.sort_by(|a, b| b.quality.cmp(&a.quality));
        if let Some(voice) = candidates.into_iter().next() {
            debug!(
                category = %category,
                voice = %voice.id,
                quality = %voice.quality,
                "Using best catalog voice"
            );
            return Some(voice);
        }

        if let Some(voice) = catalog.system_voice(category.language_tag()) {
            debug!(category = %category, voice = %voice.id, "Using system voice");
            return Some(voice);
        }

        warn!(
            category = %category,
            language = category.language_tag(),
            "No voice available, engine default will be used"
        );
        None
    }
}
