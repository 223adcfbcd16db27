/*! Ordered regex substitution.

The pipeline expresses most of its text munging as ordered lists of
(pattern, replacement) rules: placeholder insertion, tokenizer fix-ups,
sentence-boundary repair. Order is part of the semantics, so rules are
always carried and applied as slices, never as sets.
!*/
mod tables;

pub mod placeholders;

pub use tables::*;

use std::collections::HashMap;

use regex::Regex;

use crate::error::Error;

/// A single substitution rule.
///
/// The replacement is a template and may reference capture groups of this
/// rule's own pattern (`${1}` syntax).
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, Error> {
        Ok(Rule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// The pattern source, used as the rule's identity when counting.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Applies the rules in order; each rule rewrites the previous rule's output.
pub fn apply(sent: &str, rules: &[Rule]) -> String {
    let mut processed = sent.to_string();
    for rule in rules {
        processed = rule
            .pattern
            .replace_all(&processed, rule.replacement.as_str())
            .into_owned();
    }
    processed
}

/// Like [apply], but also returns the number of substitutions each rule made,
/// keyed by the rule's pattern.
pub fn apply_counted(sent: &str, rules: &[Rule]) -> (String, HashMap<String, usize>) {
    let mut processed = sent.to_string();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for rule in rules {
        let mut n = 0usize;
        processed = rule
            .pattern
            .replace_all(&processed, |caps: &regex::Captures| {
                n += 1;
                let mut dst = String::new();
                caps.expand(&rule.replacement, &mut dst);
                dst
            })
            .into_owned();
        *counts.entry(rule.pattern().to_string()).or_insert(0) += n;
    }
    (processed, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_chars() {
        let rules = vec![Rule::new(r"[\x00-\x1f\x7f]", "a").unwrap()];
        let sent = "\u{0000}a\u{001f}a\u{007f}a\u{0001}a\u{007f}a";
        assert_eq!(apply(sent, &rules), "aaaaaaaaaa");
    }

    #[test]
    fn rules_feed_forward() {
        // the second rule must see the first rule's output
        let rules = vec![
            Rule::new("a", "b").unwrap(),
            Rule::new("bb", "c").unwrap(),
        ];
        assert_eq!(apply("aa", &rules), "c");
    }

    #[test]
    fn capture_group_template() {
        let rules = vec![Rule::new(r"(\w+)-(\w+)", "${2}-${1}").unwrap()];
        assert_eq!(apply("foo-bar baz-quux", &rules), "bar-foo quux-baz");
    }

    #[test]
    fn counted() {
        let rules = vec![
            Rule::new("a", "b").unwrap(),
            Rule::new("x", "y").unwrap(),
        ];
        let (out, counts) = apply_counted("aaxa", &rules);
        assert_eq!(out, "bbyb");
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["x"], 1);
    }

    #[test]
    fn zero_width_pattern_terminates() {
        // optional match may be empty; standard single-pass semantics apply
        let rules = vec![Rule::new("b?", "-").unwrap()];
        let out = apply("ab", &rules);
        assert!(!out.is_empty());
    }
}
