//! IAST to plain-ASCII phonetic text.

use super::pauses::{insert_pauses, PAUSE_MARKER};
use unicode_normalization::UnicodeNormalization;

/// Ordered IAST replacements. Multi-character sequences come before the
/// single characters they contain.
static IAST_REPLACEMENTS: &[(&str, &str)] = &[
    // Chandrabindu (no precomposed form survives NFC)
    ("m\u{0310}", "n"),
    ("\u{0310}", "n"),
    // Danda marks
    ("||", "."),
    ("|", "."),
    ("\u{0965}", "."),
    ("\u{0964}", "."),
    // Long vowels
    ("ā", "aa"),
    ("Ā", "Aa"),
    ("ī", "ee"),
    ("Ī", "Ee"),
    ("ū", "oo"),
    ("Ū", "Oo"),
    // Vocalic R and L
    ("ṝ", "ree"),
    ("Ṝ", "Ree"),
    ("ṛ", "ri"),
    ("Ṛ", "Ri"),
    ("ḹ", "lree"),
    ("ḷ", "lri"),
    ("Ḷ", "Lri"),
    // Anusvara and visarga
    ("ṁ", "m"),
    ("Ṁ", "M"),
    ("ṃ", "m"),
    ("Ṃ", "M"),
    ("ḥ", "ha"),
    ("Ḥ", "Ha"),
    // Nasals
    ("ñ", "nya"),
    ("Ñ", "Nya"),
    ("ṅ", "ng"),
    ("Ṅ", "Ng"),
    ("ṇ", "n"),
    ("Ṇ", "N"),
    // Retroflex consonants
    ("ṭ", "t"),
    ("Ṭ", "T"),
    ("ḍ", "d"),
    ("Ḍ", "D"),
    // Sibilants
    ("ś", "sh"),
    ("Ś", "Sh"),
    ("ṣ", "sh"),
    ("Ṣ", "Sh"),
    // Compound separator
    ("-", PAUSE_MARKER),
];

/// Convert IAST-accented text into plain ASCII a generic synthesizer can read.
///
/// Input is NFC-normalised first so decomposed diacritics match the table.
/// Text without diacritics only goes through the pause rules.
#[must_use]
pub fn clean_iast(text: &str) -> String {
    let normalized: String = text.nfc().collect();

    let phonetic = IAST_REPLACEMENTS
        .iter()
        .fold(normalized, |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        });

    insert_pauses(&phonetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ā", "aa")]
    #[case("kṛṣṇa", "krishna")]
    #[case("śrī", "shree")]
    #[case("saṁjaya", "samjaya")]
    #[case("duḥkha", "duhakha")]
    #[case("jñāna", "jnyaaana")]
    #[case("aṅga", "angga")]
    #[case("Arjuna uvāca", "Arjuna uvaaca")]
    #[case("Śrī Bhagavān", "Shree Bhagavaan")]
    fn test_clean_iast_words(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_iast(input), expected);
    }

    #[test]
    fn test_hyphen_becomes_pause() {
        assert_eq!(
            clean_iast("karmaṇy-evādhikāras te"),
            "karmany, evaadhikaaras te"
        );
    }

    #[test]
    fn test_decomposed_input_matches_precomposed() {
        // a + combining macron, s + combining acute
        let decomposed = "a\u{0304}s\u{0301}rama";
        assert_eq!(clean_iast(decomposed), clean_iast("āśrama"));
        assert_eq!(clean_iast(decomposed), "aashrama");
    }

    #[test]
    fn test_chandrabindu_before_plain_m() {
        assert_eq!(clean_iast("sam\u{0310}sa"), "sansa");
    }

    #[test]
    fn test_dandas_become_sentence_stops() {
        assert_eq!(clean_iast("mā phaleṣu kadācana ||"), "maa phaleshu kadaacana.");
        assert_eq!(clean_iast("yogaḥ | iti"), "yogaha. iti");
    }

    #[test]
    fn test_function_word_pause() {
        assert_eq!(clean_iast("dharmaś ca"), "dharmash, ca");
    }

    #[test]
    fn test_ascii_text_is_stable() {
        let text = "karma yoga";
        assert_eq!(clean_iast(text), text);
        let once = clean_iast("karmaṇy-evādhikāras te mā phaleṣu kadācana");
        assert_eq!(clean_iast(&once), once);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_iast(""), "");
    }
}
