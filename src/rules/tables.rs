//! Named rule and pattern tables.
//!
//! The rule names and their relative order come from the Moses-era
//! preprocessing recipes: URI detection has to run before the bracket
//! placeholders are inserted, and the placeholder fix-up must run after
//! tokenization since tokenizers split the markers on their underscores.
use lazy_static::lazy_static;
use regex::Regex;

use super::Rule;

fn rule(pattern: &str, replacement: &str) -> Rule {
    Rule::new(pattern, replacement).expect("static rule table")
}

lazy_static! {
    /// Replaces URLs, www-forms and user@host forms with the `_uri_` marker.
    pub static ref URI: Rule = rule(
        r"((http(s)?://)|(www)|([-a-zA-Z0-9:%_+.~#?&/=]+?@))+([-a-zA-Z0-9@:%_+.~#?&/=]+)",
        "_uri_",
    );
    /// Bare domains ending in .is/.com, a looser second pass used by v2.
    pub static ref URI_SIMPLE: Rule = rule(
        r"([-a-zA-Z0-9@:%_+.~#?&/=]+?)(\.is|\.com)",
        "_uri_",
    );
    /// Removes empty bracket pairs left behind by URI replacement.
    pub static ref EMPTY_BRACKETS: Rule = rule(r"[\[(]\s*[\])]", "");

    pub static ref PIPE: Rule = rule(r"\|", "_pipe_");
    pub static ref LT: Rule = rule("<", "_lt_");
    pub static ref GT: Rule = rule(">", "_gt_");
    pub static ref BRACKET_OPEN: Rule = rule(r"\[", "_bo_");
    pub static ref BRACKET_CLOSE: Rule = rule(r"\]", "_bc_");

    /// Collapses a placeholder a tokenizer split on its underscores.
    /// Must run once, right after tokenization.
    pub static ref FIX_PLACEHOLDERS: Rule = rule(r"_ (uri|gt|lt|pipe|bo|bc) _", "_${1}_");

    /// Repairs sentence boundaries glued together without a space,
    /// e.g. "er minna en 15.Hægt er".
    pub static ref IS_SPLIT_NEWLINE: Rule = rule(
        r"([\w()\[\].]{2,})\.([A-ZÁÐÉÍÓÚÝÞÆÖ])",
        "${1}. ${2}",
    );
    /// Joins a sentence broken over a hard newline mid-clause.
    pub static ref IS_COMBINE_NEWLINE: Rule = rule(
        r"(\w+)\.\n([a-záðéíóúýþæö])",
        "${1}. ${2}",
    );

    /// Per-token escaping of characters the decoder treats as markup.
    /// The ampersand rule must stay first.
    pub static ref MOSES_ESCAPE: Vec<Rule> = vec![
        rule("&", "&amp;"),
        rule(r"\|", "&#124;"),
        rule("<", "&lt;"),
        rule(">", "&gt;"),
        rule(r"\[", "&#91;"),
        rule(r"\]", "&#93;"),
        rule("'", "&apos;"),
        rule("\"", "&quot;"),
    ];

    /// Fixes the space moses-style detokenization leaves after apostrophes.
    pub static ref PRE_DETOK_APOSTROPHE: Rule = rule("' ", "'");

    // Script blacklists for the quality filter. Anchored, per the filter's
    // starts-with matching contract; the leading wildcard keeps them useful
    // on whole lines.
    pub static ref CYRILLIC: Regex =
        Regex::new(r"^.*[\u{0400}-\u{04FF}\u{0500}-\u{052F}\u{2DE0}-\u{2DFF}\u{A640}-\u{A69F}]+.*")
            .expect("static pattern table");
    pub static ref GREEK: Regex =
        Regex::new(r"^.*[\u{0370}-\u{03BB}\u{03BD}-\u{03FF}\u{1F00}-\u{1FFF}]+.*")
            .expect("static pattern table");
    pub static ref UNKNOWN_CHARS: Regex =
        Regex::new(r"^.*[žčšèėçſ]+.*").expect("static pattern table");

    /// A token that contains anything other than letters.
    pub static ref NOT_WORDS: Regex = Regex::new(r"[\W\d_]").expect("static pattern table");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::apply;

    #[test]
    fn uri_variants() {
        let uris = [
            "www.visir.is",
            "https://circabc.europa.eu/w/browse/d4fbf23d-0da7-47fd-a954-0ada9ca",
            "http://www.mvep.hr/sankcije",
            "www.mbl.is",
            "http://malfong.is",
            "http://www.malfong.is",
            "http://www.malfong.is/",
            "www.garn.is.",
        ];
        for uri in uris {
            assert_eq!(apply(uri, &[URI.clone()]), "_uri_", "failed on {}", uri);
        }
        assert_eq!(apply("visir.is", &[URI_SIMPLE.clone()]), "_uri_");
        // both passes together leave a single marker
        let both = [URI.clone(), URI_SIMPLE.clone()];
        for uri in uris {
            assert_eq!(apply(uri, &both), "_uri_", "failed on {}", uri);
        }
    }

    #[test]
    fn uri_does_not_eat_abbreviations() {
        let both = [URI.clone(), URI_SIMPLE.clone()];
        for not_uri in ["not.a.uri", "o.s.frv."] {
            assert_ne!(apply(not_uri, &both), "_uri_");
        }
    }

    #[test]
    fn empty_brackets_removed() {
        assert_eq!(apply("text ( ) more [] end", &[EMPTY_BRACKETS.clone()]), "text  more  end");
    }

    #[test]
    fn split_newline_repair() {
        let cases = [
            (" viðauka.Skipunarstillipunktar fyrir", " viðauka. Skipunarstillipunktar fyrir"),
            ("is deleted.Financial liabi", "is deleted. Financial liabi"),
            ("are added.Paragraph 43", "are added. Paragraph 43"),
            ("„3a.GERÐARVIÐURKENNING", "„3a. GERÐARVIÐURKENNING"),
            ("er minna en 15.Hægt er", "er minna en 15. Hægt er"),
            ("(4).Til", "(4). Til"),
            ("2.2.3.4.Meginregla ", "2.2.3.4. Meginregla "),
            ("asdf.Þ", "asdf. Þ"),
        ];
        for (input, expected) in cases {
            assert_eq!(apply(input, &[IS_SPLIT_NEWLINE.clone()]), expected);
        }
        // URLs and abbreviations must survive unharmed
        let untouched = [
            "adopted: http://ec.europa.eu/enterprise/reach/docs/ghs/ghs_prop_vol_iii_en.pdf",
            " o.s.frv. sem starfa",
        ];
        for input in untouched {
            assert_eq!(apply(input, &[IS_SPLIT_NEWLINE.clone()]), input);
        }
    }

    #[test]
    fn combine_newline_repair() {
        let text = "fram í dag eða á morgun, hvað hv.\nþm.\nSjálfstfl.\nhefðu sagt um ýmis mál.";
        let result = apply(text, &[IS_COMBINE_NEWLINE.clone()]);
        assert_eq!(text.matches('\n').count(), 3);
        assert_eq!(result.matches('\n').count(), 1);
    }

    #[test]
    fn script_blacklists() {
        let words = [
            "дейност", "είδοσ", "εγκατάστασησ", "казеин", "приложение", "ž", "č", "š",
            "лицата", "12052",
        ];
        let cyrillic: Vec<bool> = words.iter().map(|w| CYRILLIC.is_match(w)).collect();
        assert_eq!(
            cyrillic,
            [true, false, false, true, true, false, false, false, true, false]
        );
        let greek: Vec<bool> = words.iter().map(|w| GREEK.is_match(w)).collect();
        assert_eq!(
            greek,
            [false, true, true, false, false, false, false, false, false, false]
        );
        let unknown: Vec<bool> = words.iter().map(|w| UNKNOWN_CHARS.is_match(w)).collect();
        assert_eq!(
            unknown,
            [false, false, false, false, false, true, true, true, false, false]
        );
    }

    #[test]
    fn moses_escape_order() {
        assert_eq!(apply("a&b", &MOSES_ESCAPE), "a&amp;b");
        assert_eq!(apply("a|b", &MOSES_ESCAPE), "a&#124;b");
        // the ampersand introduced by a later rule is not re-escaped
        assert_eq!(apply("<", &MOSES_ESCAPE), "&lt;");
    }
}
