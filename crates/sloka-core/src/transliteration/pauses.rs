//! Pause insertion shared by the IAST and Devanagari converters.
//!
//! Every rule here is idempotent, so feeding already-converted text back
//! through a converter leaves it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Text a generic synthesizer renders as a short pause
pub const PAUSE_MARKER: &str = ", ";

/// Short particles that get slurred into the previous word unless a pause precedes them
const FUNCTION_WORDS: &[&str] = &[
    "ca", "cha", "tu", "hi", "vaa", "iva", "api", "eva", "iti", "atha",
];

const PAUSE_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?'];

static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+([,.;:!?])").expect("space-before-punctuation pattern is valid")
});

// Digits are excluded so decimals such as "1.5" survive.
static GLUED_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([,.;:!?])([^\s\d,.;:!?])").expect("glued-punctuation pattern is valid")
});

static REPEATED_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("repeated-spaces pattern is valid"));

/// Apply the pause rules to already-romanized text.
pub(crate) fn insert_pauses(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1");
    let text = GLUED_PUNCTUATION.replace_all(&text, "$1 $2");
    let text = pause_before_function_words(&text);
    collapse_spaces(&text)
}

/// Collapse runs of spaces into one. Newlines and tabs are kept.
pub(crate) fn collapse_spaces(text: &str) -> String {
    REPEATED_SPACES.replace_all(text, " ").into_owned()
}

fn pause_before_function_words(text: &str) -> String {
    let mut words: Vec<String> = text.split(' ').map(str::to_owned).collect();
    let mut previous: Option<usize> = None;

    for index in 0..words.len() {
        if words[index].is_empty() {
            continue;
        }
        if let Some(prev) = previous {
            if is_function_word(&words[index]) && !ends_with_pause(&words[prev]) {
                words[prev].push(',');
            }
        }
        previous = Some(index);
    }

    words.join(" ")
}

fn is_function_word(word: &str) -> bool {
    let bare = word.trim_end_matches(PAUSE_PUNCTUATION);
    FUNCTION_WORDS
        .iter()
        .any(|candidate| bare.eq_ignore_ascii_case(candidate))
}

fn ends_with_pause(word: &str) -> bool {
    word.chars()
        .last()
        .map_or(false, |ch| PAUSE_PUNCTUATION.contains(&ch))
}
