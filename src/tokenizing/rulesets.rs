//! Rule-list tokenizers.
//!
//! The moses, toktok and treebank styles are all ordered substitution
//! lists followed by a whitespace split; they differ in which characters
//! they pad with spaces and in how they treat apostrophes and final
//! periods. The moses style separates underscores, so it splits the
//! placeholder markers apart; toktok and treebank leave them whole.
use crate::rules::{apply, Rule};

fn rule(pattern: &str, replacement: &str) -> Rule {
    Rule::new(pattern, replacement).expect("static rule table")
}

/// Shared digit-guarded comma handling: commas are separated unless they
/// sit between digits (1,000 stays together).
fn comma_rules() -> Vec<Rule> {
    vec![
        rule(r"([^\p{N}]),", "${1} , "),
        rule(r",([^\p{N}])", " , ${1}"),
        rule(r",$", " ,"),
    ]
}

/// Aggressive splitting: every symbol outside letters/digits/., ' is
/// padded, so URLs and marker tokens come apart.
pub fn moses_rules() -> Vec<Rule> {
    let mut rules = vec![
        rule(r"([^\s\p{L}\p{N}.,'])", " ${1} "),
        rule(r"(\p{L})'(\p{L})", "${1} '${2}"),
    ];
    rules.extend(comma_rules());
    rules.push(rule(r"([^\s.])\.(\s|$)", "${1} .${2}"));
    rules
}

/// Conservative splitting: URLs, domains and marker tokens survive whole,
/// apostrophes are padded on both sides, only the sentence-final period is
/// detached.
pub fn toktok_rules() -> Vec<Rule> {
    let mut rules = vec![rule(
        "([!?;()\\[\\]{}\"«»„“”%€£°])",
        " ${1} ",
    )];
    rules.extend(comma_rules());
    rules.push(rule("'", " ' "));
    rules.push(rule(r"\.$", " ."));
    rules
}

/// Treebank-style splitting: contractions split before the clitic,
/// abbreviation periods kept, at-signs and symbols padded.
pub fn treebank_rules() -> Vec<Rule> {
    let mut rules = vec![
        rule(r"([^\s\p{L}\p{N}.,'_])", " ${1} "),
        rule(r"(\p{L})n't\b", "${1} n't"),
        rule(r"(\p{L})'(s|m|re|ve|ll|d)\b", "${1} '${2}"),
    ];
    rules.extend(comma_rules());
    rules.push(rule(r"\.$", " ."));
    rules
}

#[derive(Debug)]
pub struct RuleTokenizer {
    rules: Vec<Rule>,
}

impl RuleTokenizer {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTokenizer { rules }
    }

    pub fn tokenize(&self, sent: &str) -> Vec<String> {
        apply(sent.trim_end(), &self.rules)
            .split_whitespace()
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(rules: Vec<Rule>, sent: &str) -> String {
        RuleTokenizer::new(rules).tokenize(sent).join(" ")
    }

    #[test]
    fn moses_compounds() {
        assert_eq!(tok(moses_rules(), "H2O, CO2, 9%"), "H2O , CO2 , 9 %");
    }

    #[test]
    fn moses_splits_urls() {
        assert_eq!(
            tok(moses_rules(), "http://www.malfong.is"),
            "http : / / www.malfong.is"
        );
    }

    #[test]
    fn moses_splits_markers() {
        assert_eq!(
            tok(moses_rules(), "I will place _uri_ and _lt_."),
            "I will place _ uri _ and _ lt _ ."
        );
    }

    #[test]
    fn moses_contractions() {
        assert_eq!(tok(moses_rules(), "It's i'm couldn't"), "It 's i 'm couldn 't");
    }

    #[test]
    fn moses_abbreviations() {
        assert_eq!(
            tok(moses_rules(), "nr., gr., 1sti fyrsti, 1., 2ja, o.s.frv."),
            "nr . , gr . , 1sti fyrsti , 1 . , 2ja , o.s.frv ."
        );
    }

    #[test]
    fn toktok_keeps_urls_and_markers() {
        assert_eq!(
            tok(toktok_rules(), "http://www.malfong.is"),
            "http://www.malfong.is"
        );
        assert_eq!(
            tok(toktok_rules(), "I will place _uri_ and _lt_."),
            "I will place _uri_ and _lt_ ."
        );
    }

    #[test]
    fn toktok_abbreviations_and_percent() {
        assert_eq!(
            tok(toktok_rules(), "nr., art., 1st first, 1., 2nd"),
            "nr. , art. , 1st first , 1. , 2nd"
        );
        assert_eq!(tok(toktok_rules(), "H2O, CO2, 9%"), "H2O , CO2 , 9 %");
    }

    #[test]
    fn toktok_apostrophes() {
        assert_eq!(tok(toktok_rules(), "It's i'm couldn't"), "It ' s i ' m couldn ' t");
    }

    #[test]
    fn treebank_contractions() {
        assert_eq!(
            tok(treebank_rules(), "It's i'm couldn't"),
            "It 's i 'm could n't"
        );
    }

    #[test]
    fn treebank_abbreviations() {
        assert_eq!(
            tok(treebank_rules(), "nr., art., 1st first, 1., 2nd"),
            "nr. , art. , 1st first , 1. , 2nd"
        );
    }

    #[test]
    fn treebank_splits_at_signs() {
        assert_eq!(
            tok(treebank_rules(), "I will place @uri@ and @lt@."),
            "I will place @ uri @ and @ lt @ ."
        );
    }
}
