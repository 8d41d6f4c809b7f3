//! Script to phonetic text conversion.
//!
//! Everything in here is a pure function of its input: no state, no failure
//! cases, and converted output fed back in comes out unchanged.

/// Devanagari conversion (conjuncts, characters, cleanup)
pub mod devanagari;
/// IAST cleanup
pub mod iast;
/// Pause marker rules shared by both converters
pub mod pauses;
/// Breathing spaces for long words
pub mod syllables;

pub use devanagari::devanagari_to_phonetic;
pub use iast::clean_iast;
pub use pauses::PAUSE_MARKER;
pub use syllables::{syllabify, BREATH_INTERVAL, LONG_WORD_THRESHOLD, WORD_GAP};

/// Romanized-phonetic form of a Devanagari verse: converted, then syllabified.
#[must_use]
pub fn romanize(devanagari: &str) -> String {
    syllabify(&devanagari_to_phonetic(devanagari))
}
