//! Detokenizers.
//!
//! Rule-based inverses of the tokenizers: join on spaces, then re-attach
//! punctuation. Note that detokenizing a token stream produced by a
//! different method is not detected here; the dispatch layer validates the
//! (language, method) pair but pairing across a round trip is the caller's
//! responsibility.
use lazy_static::lazy_static;

use crate::rules::{apply, Rule, PRE_DETOK_APOSTROPHE};

use super::subword::join_subwords;

fn rule(pattern: &str, replacement: &str) -> Rule {
    Rule::new(pattern, replacement).expect("static rule table")
}

lazy_static! {
    static ref ATTACH: Vec<Rule> = vec![
        rule(r"\s+([.,:;!?%)\]}»”])", "${1}"),
        rule(r"([(\[{«„])\s+", "${1}"),
        rule(r"(\p{L}) n't", "${1}n't"),
        rule(r" '(\p{L})", "'${1}"),
    ];
}

#[derive(Debug)]
pub enum Detokenizer {
    /// moses-style: attach punctuation, rejoin clitics.
    Moses,
    /// basic Icelandic: attach punctuation only.
    Shallow,
    /// inverse of the `@@` subword convention.
    Subword,
}

impl Detokenizer {
    pub fn detokenize(&self, tokens: &[String]) -> String {
        match self {
            Detokenizer::Moses | Detokenizer::Shallow => apply(&tokens.join(" "), &ATTACH),
            Detokenizer::Subword => join_subwords(tokens),
        }
    }
}

/// Repairs the stray space a moses-style translation leaves after
/// apostrophes; run before detokenization.
pub fn pre_detokenize(sent: &str) -> String {
    apply(sent, &[PRE_DETOK_APOSTROPHE.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn attach_punctuation() {
        let d = Detokenizer::Moses;
        assert_eq!(
            d.detokenize(&toks("halló , heimur !")),
            "halló, heimur!"
        );
        assert_eq!(d.detokenize(&toks("( innan sviga )")), "(innan sviga)");
    }

    #[test]
    fn rejoin_clitics() {
        let d = Detokenizer::Moses;
        assert_eq!(d.detokenize(&toks("it 's fine")), "it's fine");
        assert_eq!(d.detokenize(&toks("could n't go")), "couldn't go");
    }

    #[test]
    fn pre_detokenization_repair() {
        assert_eq!(pre_detokenize("it ' s fine"), "it 's fine");
    }

    #[test]
    fn subword_inverse() {
        let d = Detokenizer::Subword;
        assert_eq!(d.detokenize(&toks("hest@@ ur er bestur")), "hestur er bestur");
    }
}
