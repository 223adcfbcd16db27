//! Subword segmentation against a learned vocabulary.
//!
//! Words are split into the longest vocabulary units available, with the
//! `@@` continuation convention on every non-final piece. The vocabulary
//! file lists one unit per line and is the expensive part of construction,
//! which is why subword tokenizers are cached by their model path.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

#[derive(Debug)]
pub struct SubwordTokenizer {
    vocab: HashSet<String>,
    max_unit_chars: usize,
}

impl SubwordTokenizer {
    pub fn from_vocab_file(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::MissingModel(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        let mut vocab = HashSet::new();
        let mut max_unit_chars = 1;
        for line in reader.lines() {
            let unit = line?.trim().to_string();
            if unit.is_empty() {
                continue;
            }
            max_unit_chars = max_unit_chars.max(unit.chars().count());
            vocab.insert(unit);
        }
        Ok(SubwordTokenizer {
            vocab,
            max_unit_chars,
        })
    }

    /// Greedy longest-match segmentation of a single word.
    fn split_word(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut pieces = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let longest = self.max_unit_chars.min(chars.len() - start);
            let mut taken = 1;
            for len in (1..=longest).rev() {
                let candidate: String = chars[start..start + len].iter().collect();
                if self.vocab.contains(&candidate) {
                    taken = len;
                    break;
                }
            }
            pieces.push(chars[start..start + taken].iter().collect());
            start += taken;
        }
        pieces
    }

    pub fn tokenize(&self, sent: &str) -> Vec<String> {
        let mut out = Vec::new();
        for word in sent.split_whitespace() {
            let pieces = self.split_word(word);
            let last = pieces.len() - 1;
            for (i, piece) in pieces.into_iter().enumerate() {
                if i < last {
                    out.push(format!("{}@@", piece));
                } else {
                    out.push(piece);
                }
            }
        }
        out
    }
}

/// Exact inverse of the `@@` convention.
pub fn join_subwords(tokens: &[String]) -> String {
    tokens.join(" ").replace("@@ ", "")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn vocab_file(units: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for unit in units {
            writeln!(f, "{}", unit).unwrap();
        }
        f.flush().unwrap();
        f
    }

    #[test]
    fn greedy_longest_match() {
        let f = vocab_file(&["hest", "ur", "h", "e", "s", "t", "u", "r"]);
        let tok = SubwordTokenizer::from_vocab_file(f.path()).unwrap();
        assert_eq!(tok.tokenize("hestur"), vec!["hest@@", "ur"]);
    }

    #[test]
    fn unknown_chars_become_single_units() {
        let f = vocab_file(&["ab"]);
        let tok = SubwordTokenizer::from_vocab_file(f.path()).unwrap();
        assert_eq!(tok.tokenize("abc"), vec!["ab@@", "c"]);
    }

    #[test]
    fn round_trip() {
        let f = vocab_file(&["hest", "ur", "inn"]);
        let tok = SubwordTokenizer::from_vocab_file(f.path()).unwrap();
        let tokens = tok.tokenize("hesturinn er hestur");
        assert_eq!(join_subwords(&tokens), "hesturinn er hestur");
    }

    #[test]
    fn missing_vocab_is_loud() {
        let err = SubwordTokenizer::from_vocab_file(Path::new("/no/such/vocab")).unwrap_err();
        assert!(matches!(err, Error::MissingModel(_)));
    }
}
