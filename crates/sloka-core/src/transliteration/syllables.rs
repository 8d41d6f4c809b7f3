//! Breathing spaces for long compound words.

/// Words longer than this many characters get broken up
pub const LONG_WORD_THRESHOLD: usize = 10;

/// A break may follow every Nth character
pub const BREATH_INTERVAL: usize = 4;

/// Separator placed between words (a longer pause than a single space)
pub const WORD_GAP: &str = "  ";

/// Insert breathing spaces into long words and re-join all words with [`WORD_GAP`].
///
/// Words of at most [`LONG_WORD_THRESHOLD`] characters are left alone. In
/// longer words a space goes after every [`BREATH_INTERVAL`]th character
/// that is a vowel, never at the very end of the word.
#[must_use]
pub fn syllabify(text: &str) -> String {
    text.split_whitespace()
        .map(breathe)
        .collect::<Vec<_>>()
        .join(WORD_GAP)
}

fn breathe(word: &str) -> String {
    let length = word.chars().count();
    if length <= LONG_WORD_THRESHOLD {
        return word.to_owned();
    }

    let mut out = String::with_capacity(word.len() + length / BREATH_INTERVAL);
    for (index, ch) in word.chars().enumerate() {
        out.push(ch);
        let position = index + 1;
        if position % BREATH_INTERVAL == 0 && position < length && is_vowel(ch) {
            out.push(' ');
        }
    }
    out
}

const fn is_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(syllabify("dharma"), "dharma");
        assert_eq!(syllabify("abcdefghij"), "abcdefghij");
    }

    #[test]
    fn test_words_joined_with_gap() {
        assert_eq!(syllabify("maa phaleshu"), "maa  phaleshu");
        assert_eq!(syllabify("  one   two  "), "one  two");
    }

    #[test]
    fn test_long_word_breaks_on_vowels() {
        // positions 8 ("e") and 16 ("a") are vowels, 4/12/20 are not
        assert_eq!(
            syllabify("karmanyevaadhikaaraste"),
            "karmanye vaadhika araste"
        );
        // long, but no vowel lands on a multiple of four
        assert_eq!(syllabify("dharmakshetre"), "dharmakshetre");
    }

    #[test]
    fn test_no_break_at_word_end() {
        // 12 chars, position 12 is a vowel but ends the word
        let word = "bbbabbbbbbba";
        assert_eq!(syllabify(word), "bbba bbbbbbba");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(syllabify(""), "");
    }
}
