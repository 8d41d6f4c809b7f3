//! Devanagari to plain-ASCII phonetic text.
//!
//! Three passes:
//!
//! 1. known conjunct clusters, longest first;
//! 2. single characters through a fixed table;
//! 3. cleanup of the artifacts pass 2 leaves behind.
//!
//! Consonants carry their inherent `a` out of pass 2. The virama and every
//! dependent vowel sign emit [`SUPPRESS`] in front of their own text, and
//! pass 3 deletes the inherent `a` sitting in front of that marker.

use super::pauses::{collapse_spaces, insert_pauses, PAUSE_MARKER};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Internal marker for "drop the preceding inherent vowel". Never survives pass 3.
const SUPPRESS: char = '\u{E000}';

/// Conjunct clusters ordered longest-match-first.
static CONJUNCTS: &[(&str, &str)] = &[
    // Three consonants
    ("क्ष्म", "kshma"),
    ("क्ष्य", "kshya"),
    ("स्त्र", "stra"),
    ("न्त्र", "ntra"),
    ("न्द्र", "ndra"),
    ("ष्ट्र", "shtra"),
    ("त्त्व", "ttva"),
    ("द्ध्य", "ddhya"),
    // Two consonants
    ("क्ष", "ksha"),
    ("ज्ञ", "gya"),
    ("त्र", "tra"),
    ("श्र", "shra"),
    ("द्ध", "ddha"),
    ("द्व", "dva"),
    ("द्य", "dya"),
    ("द्र", "dra"),
    ("द्म", "dma"),
    ("त्त", "tta"),
    ("त्व", "tva"),
    ("त्य", "tya"),
    ("त्म", "tma"),
    ("स्व", "sva"),
    ("स्थ", "stha"),
    ("स्त", "sta"),
    ("न्त", "nta"),
    ("न्द", "nda"),
    ("न्न", "nna"),
    ("न्य", "nya"),
    ("क्त", "kta"),
    ("क्र", "kra"),
    ("प्र", "pra"),
    ("ग्र", "gra"),
    ("ब्र", "bra"),
    ("ध्य", "dhya"),
    ("र्म", "rma"),
    ("र्य", "rya"),
    ("र्व", "rva"),
    ("र्थ", "rtha"),
    ("र्ध", "rdha"),
    ("ष्ट", "shta"),
    ("ष्ठ", "shtha"),
    ("ण्ड", "nda"),
    ("ङ्ग", "nga"),
    ("ञ्च", "ncha"),
    ("ञ्ज", "nja"),
    ("श्च", "shcha"),
    ("च्छ", "chchha"),
    ("म्य", "mya"),
    ("ल्य", "lya"),
    ("व्य", "vya"),
    ("ह्म", "hma"),
    ("ह्य", "hya"),
];

/// Single-character table. Dependent signs lead with [`SUPPRESS`].
static CHARACTERS: &[(char, &str)] = &[
    // Independent vowels
    ('अ', "a"),
    ('आ', "aa"),
    ('इ', "i"),
    ('ई', "ee"),
    ('उ', "u"),
    ('ऊ', "oo"),
    ('ऋ', "ri"),
    ('ॠ', "ree"),
    ('ऌ', "lri"),
    ('ॡ', "lree"),
    ('ए', "e"),
    ('ऐ', "ai"),
    ('ओ', "o"),
    ('औ', "au"),
    ('ऍ', "e"),
    ('ऑ', "o"),
    // Dependent vowel signs
    ('ा', "\u{E000}aa"),
    ('ि', "\u{E000}i"),
    ('ी', "\u{E000}ee"),
    ('ु', "\u{E000}u"),
    ('ू', "\u{E000}oo"),
    ('ृ', "\u{E000}ri"),
    ('ॄ', "\u{E000}ree"),
    ('ॢ', "\u{E000}lri"),
    ('ॣ', "\u{E000}lree"),
    ('े', "\u{E000}e"),
    ('ै', "\u{E000}ai"),
    ('ो', "\u{E000}o"),
    ('ौ', "\u{E000}au"),
    ('ॅ', "\u{E000}e"),
    ('ॉ', "\u{E000}o"),
    // Virama
    ('्', "\u{E000}"),
    // Velars
    ('क', "ka"),
    ('ख', "kha"),
    ('ग', "ga"),
    ('घ', "gha"),
    ('ङ', "nga"),
    // Palatals
    ('च', "cha"),
    ('छ', "chha"),
    ('ज', "ja"),
    ('झ', "jha"),
    ('ञ', "nya"),
    // Retroflexes
    ('ट', "ta"),
    ('ठ', "tha"),
    ('ड', "da"),
    ('ढ', "dha"),
    ('ण', "na"),
    // Dentals
    ('त', "ta"),
    ('थ', "tha"),
    ('द', "da"),
    ('ध', "dha"),
    ('न', "na"),
    // Labials
    ('प', "pa"),
    ('फ', "pha"),
    ('ब', "ba"),
    ('भ', "bha"),
    ('म', "ma"),
    // Semivowels, sibilants, aspirate
    ('य', "ya"),
    ('र', "ra"),
    ('ल', "la"),
    ('ळ', "la"),
    ('व', "va"),
    ('श', "sha"),
    ('ष', "sha"),
    ('स', "sa"),
    ('ह', "ha"),
    // Nasalization and other marks
    ('ं', "m"),
    ('ँ', "n"),
    ('ः', "ha"),
    ('़', ""),
    ('ऽ', ""),
    ('ॐ', "om"),
    ('\u{200C}', ""),
    ('\u{200D}', ""),
    // Digits
    ('०', "0"),
    ('१', "1"),
    ('२', "2"),
    ('३', "3"),
    ('४', "4"),
    ('५', "5"),
    ('६', "6"),
    ('७', "7"),
    ('८', "8"),
    ('९', "9"),
    // Punctuation
    ('।', "."),
    ('॥', "."),
    ('-', PAUSE_MARKER),
];

static CHARACTER_MAP: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| CHARACTERS.iter().copied().collect());

/// Convert Devanagari script into plain ASCII phonetic text.
///
/// Characters outside the tables (ASCII, whitespace) pass through unchanged.
#[must_use]
pub fn devanagari_to_phonetic(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    let clustered = replace_conjuncts(normalized);
    let mapped = replace_characters(&clustered);
    insert_pauses(&cleanup(&mapped))
}

fn replace_conjuncts(text: String) -> String {
    CONJUNCTS.iter().fold(text, |acc, (cluster, replacement)| {
        if acc.contains(cluster) {
            acc.replace(cluster, replacement)
        } else {
            acc
        }
    })
}

fn replace_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match CHARACTER_MAP.get(&ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

fn cleanup(text: &str) -> String {
    let inherent_dropped = text.replace(&format!("a{SUPPRESS}"), "");
    let residue_stripped: String = inherent_dropped
        .chars()
        .filter(|&ch| ch != SUPPRESS)
        .collect();
    collapse_spaces(&collapse_vowel_runs(&residue_stripped))
}

/// Runs of three or more identical vowels shrink to two.
fn collapse_vowel_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0usize;

    for ch in text.chars() {
        if Some(ch) == previous {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }
        if run > 2 && matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u') {
            continue;
        }
        out.push(ch);
    }
    out
}
