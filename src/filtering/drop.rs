//! The drop-line heuristic.
//!
//! Decides per line whether a corpus line is too noisy to train on, from a
//! regex blacklist, a whitelist of known tokens and a known-token ratio.
//! The corpus-level pass runs in parallel but reports 1-based line numbers
//! against the original input order.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use regex::Regex;

use super::Filter;
use crate::batch;
use crate::error::Error;
use crate::rules::NOT_WORDS;

/// The outcome for a single line; produced once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DropDecision {
    pub drop: bool,
    pub fraction: f64,
    pub line: String,
}

/// Compiles a blacklist pattern with the filter's starts-with semantics.
pub fn anchored(pattern: &str) -> Result<Regex, Error> {
    Ok(Regex::new(&format!("^(?:{})", pattern))?)
}

/// Fraction of whitespace tokens present in `known`. Most useful on a
/// tokenized sentence already reduced to plain words.
pub fn known_token_fraction(sent: &str, known: &HashSet<String>) -> f64 {
    let tokens: Vec<&str> = sent.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens.iter().filter(|t| known.contains(**t)).count();
    hits as f64 / tokens.len() as f64
}

/// Drops every token that contains a digit, punctuation or other non-letter.
pub fn remove_non_words(sent: &str) -> String {
    sent.split_whitespace()
        .filter(|token| !NOT_WORDS.is_match(token))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Drop criteria, evaluated in a fixed precedence order; see [DropCriteria::decide].
pub struct DropCriteria {
    /// Anchored patterns; any match drops the line. Compile with [anchored].
    pub blacklist: Vec<Regex>,
    pub known_tokens: HashSet<String>,
    pub keep_ratio: f64,
    pub normalize: bool,
    pub keep_sent_length: usize,
}

impl Default for DropCriteria {
    fn default() -> Self {
        DropCriteria {
            blacklist: Vec::new(),
            known_tokens: HashSet::new(),
            keep_ratio: 0.5,
            normalize: true,
            keep_sent_length: 1,
        }
    }
}

impl DropCriteria {
    /// Decides whether a line should be dropped. Total: never fails.
    ///
    /// 1. With `normalize`, reduce the line to plain-word tokens.
    /// 2. An empty reduced line is dropped.
    /// 3. A blacklist match on the reduced line drops it.
    /// 4. A reduced line of at most `keep_sent_length` tokens is kept.
    /// 5. Otherwise the known-token fraction decides against `keep_ratio`.
    pub fn decide(&self, line: &str) -> DropDecision {
        let reduced = if self.normalize {
            remove_non_words(line)
        } else {
            line.to_string()
        };
        if reduced.is_empty() {
            return DropDecision {
                drop: true,
                fraction: 0.0,
                line: line.to_string(),
            };
        }
        if self.blacklist.iter().any(|re| re.is_match(&reduced)) {
            return DropDecision {
                drop: true,
                fraction: 0.0,
                line: line.to_string(),
            };
        }
        if reduced.split_whitespace().count() <= self.keep_sent_length {
            return DropDecision {
                drop: false,
                fraction: 1.0,
                line: line.to_string(),
            };
        }
        let fraction = known_token_fraction(&reduced, &self.known_tokens);
        DropDecision {
            drop: fraction < self.keep_ratio,
            fraction,
            line: line.to_string(),
        }
    }
}

impl Filter<&str> for DropCriteria {
    fn detect(&self, line: &str) -> bool {
        self.decide(line).drop
    }
}

/// Applies [DropCriteria::decide] over a whole corpus in parallel and
/// returns `(1-based line number, known fraction, line)` for every line
/// flagged for dropping, in input order.
pub fn get_drop_lines(
    lines: &[String],
    criteria: &DropCriteria,
    workers: usize,
    chunk_size: usize,
) -> Result<Vec<(usize, f64, String)>, Error> {
    let decisions = batch::run(lines, workers, chunk_size, |line| Ok(criteria.decide(line)))?;
    Ok(decisions
        .into_iter()
        .enumerate()
        .filter(|(_, decision)| decision.drop)
        .map(|(idx, decision)| (idx + 1, decision.fraction, decision.line))
        .collect())
}

/// Copies `src` to `dst`, skipping the given 1-based line numbers.
///
/// Line numbers are consumed in ascending order; the caller must pass them
/// sorted ascending (which [get_drop_lines] already guarantees).
pub fn drop_lines(src: &Path, dst: &Path, drop: &[usize]) -> Result<(), Error> {
    debug_assert!(drop.windows(2).all(|w| w[0] < w[1]), "drop lines must be sorted ascending");
    let reader = BufReader::new(File::open(src)?);
    let mut writer = BufWriter::new(File::create(dst)?);
    let mut to_skip = drop.iter().copied();
    let mut next_skip = to_skip.next();
    let mut kept = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if Some(idx + 1) == next_skip {
            next_skip = to_skip.next();
        } else {
            writeln!(writer, "{}", line)?;
            kept += 1;
        }
    }
    info!("dropped={} kept={} dst={:?}", drop.len(), kept, dst);
    Ok(())
}
