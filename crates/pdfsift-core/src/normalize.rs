//! Cleanup of raw extracted text before tokenization and chunking.

use std::sync::LazyLock;

use regex::Regex;

// Residue of broken character-to-glyph maps in the extractor output.
static CID_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cid:\d+").expect("static regex must compile"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex must compile"));
static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([A-Za-z])").expect("static regex must compile"));
static LETTER_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z])(\d)").expect("static regex must compile"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Normalize raw extracted text.
///
/// Strips `cid:<digits>` placeholders, inserts missing word boundaries
/// (lowercase→uppercase, digit↔letter run-ons), collapses whitespace
/// runs to single spaces, and trims. Pure; idempotent; empty or
/// all-whitespace input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = CID_PLACEHOLDER.replace_all(text, " ");
    let text = LOWER_UPPER.replace_all(&text, "$1 $2");
    let text = DIGIT_LETTER.replace_all(&text, "$1 $2");
    let text = LETTER_DIGIT.replace_all(&text, "$1 $2");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn whitespace_only_input() {
        assert_eq!(normalize("  \t\n  "), "");
    }

    #[test]
    fn strips_cid_placeholders() {
        assert_eq!(normalize("before cid:123 after"), "before after");
        assert_eq!(normalize("cid:7cid:8x"), "x");
    }

    #[test]
    fn splits_camel_case_runons() {
        assert_eq!(normalize("endOfSentenceNext"), "end Of Sentence Next");
    }

    #[test]
    fn splits_digit_letter_boundaries() {
        assert_eq!(normalize("chapter3begins"), "chapter 3 begins");
        assert_eq!(normalize("page12"), "page 12");
        assert_eq!(normalize("12pages"), "12 pages");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("a   b\t\nc"), "a b c");
    }

    #[test]
    fn leaves_clean_text_alone() {
        let clean = "A plain sentence with 4 words.";
        assert_eq!(normalize(clean), clean);
    }

    #[test]
    fn preserves_non_ascii() {
        assert_eq!(normalize("Mehmet  Akif  Ersoy"), "Mehmet Akif Ersoy");
        assert_eq!(normalize("şiir üzerine"), "şiir üzerine");
    }

    mod proptest_normalize {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn idempotent(text in "\\PC{0,400}") {
                let once = normalize(&text);
                prop_assert_eq!(normalize(&once), once);
            }

            #[test]
            fn output_has_no_whitespace_runs(text in "\\PC{0,400}") {
                let out = normalize(&text);
                prop_assert!(!out.contains("  "));
                prop_assert!(!out.contains('\t'));
                prop_assert!(!out.contains('\n'));
                prop_assert_eq!(out.trim(), &out);
            }

            #[test]
            fn output_has_no_cid_tokens(text in "(\\PC|cid:[0-9]{1,4}){0,50}") {
                prop_assert!(!CID_PLACEHOLDER.is_match(&normalize(&text)));
            }
        }
    }
}
