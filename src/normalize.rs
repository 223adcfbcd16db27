//! Sentence normalization.
//!
//! Lowercases and NFKC-normalizes a single sentence. This runs first in
//! every preprocessing chain so that the substitution rules and tokenizers
//! downstream only ever see one casing and one codepoint composition.
use unicode_normalization::UnicodeNormalization;

/// Unicode lowercase followed by NFKC normalization.
///
/// Pure and total: there is no error condition, and applying it twice
/// yields the same sentence as applying it once.
pub fn lowercase_normalize(sent: &str) -> String {
    sent.chars().flat_map(char::to_lowercase).nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::lowercase_normalize;

    #[test]
    fn composed_and_decomposed_agree() {
        // LATIN CAPITAL LETTER C WITH CEDILLA
        let composed = "UppEr \u{00C7}";
        // LATIN CAPITAL LETTER C followed by COMBINING CEDILLA
        let decomposed = "UppEr \u{0043}\u{0327}";
        let target = "upper \u{00E7}";

        assert_eq!(lowercase_normalize(composed), target);
        assert_eq!(lowercase_normalize(decomposed), target);
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Ég skil bækurnar eftir!",
            "UppEr \u{0043}\u{0327}",
            "H2O, CO2, 9%",
            "ﬁne ligature",
            "",
        ];
        for s in samples {
            let once = lowercase_normalize(s);
            assert_eq!(lowercase_normalize(&once), once);
        }
    }
}
