/*! Corpus file utilities.

Path-addressed, line-oriented helpers for the parallel corpus layout:
files follow the `modifier-modifier.<lang>` naming convention, one
sentence per line, and the EN and IS sides of a stage are kept aligned by
line number. Everything here either streams or states loudly that it
reads the whole file.
!*/
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::batch::{read_lines, write_lines};
use crate::error::Error;
use crate::lang::Lang;
use crate::rules::{apply, MOSES_ESCAPE};

/// Path for a corpus stage: `dir/modifier-modifier.<lang>`.
pub fn stage_path(dir: &Path, lang: Lang, modifiers: &[&str]) -> PathBuf {
    dir.join(format!("{}.{}", modifiers.join("-"), lang.code()))
}

/// Like [stage_path], but the file must already exist.
pub fn read_stage(dir: &Path, lang: Lang, modifiers: &[&str]) -> Result<PathBuf, Error> {
    let path = stage_path(dir, lang, modifiers);
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Custom(format!("{:?} does not exist", path)))
    }
}

/// Lists corpus files for the given languages, newest naming first.
pub fn list_stages(dir: &Path, langs: &[Lang]) -> Result<Vec<PathBuf>, Error> {
    let mut results = Vec::new();
    for lang in langs {
        let pattern = format!("{}/*.{}", dir.display(), lang.code());
        for entry in glob::glob(&pattern)? {
            results.push(entry?);
        }
    }
    results.sort();
    Ok(results)
}

/// Counts newlines through a fixed-size buffer; does not build lines.
pub fn line_count(path: &Path) -> Result<usize, Error> {
    let mut reader = File::open(path)?;
    let mut buf = [0u8; 1024 * 1024];
    let mut lines = 0;
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        lines += buf[..read].iter().filter(|b| **b == b'\n').count();
    }
    Ok(lines)
}

fn sizeof_fmt(num: u64) -> String {
    let mut num = num as f64;
    for unit in ["B", "KiB", "MiB", "GiB", "TiB"] {
        if num.abs() < 1024.0 {
            return format!("{:.1}{}", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1}PiB", num)
}

/// Resolved path, human-readable size and line count.
pub fn info(path: &Path) -> Result<(String, String, usize), Error> {
    let size = sizeof_fmt(path.metadata()?.len());
    let lines = line_count(path)?;
    Ok((path.display().to_string(), size, lines))
}

pub fn info_formatted(path: &Path) -> Result<String, Error> {
    let (path, size, lines) = info(path)?;
    Ok(format!("{:<40}{:^15}{:>10}", path, size, lines))
}

/// First `length` lines of a corpus.
pub fn peek(path: &Path, length: usize) -> Result<Vec<String>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::with_capacity(length);
    for line in reader.lines().take(length) {
        lines.push(line?);
    }
    Ok(lines)
}

/// Concatenates corpora into one file, in the order given.
pub fn combine(paths: &[PathBuf], dst: &Path) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(dst)?);
    for path in paths {
        let mut reader = File::open(path)?;
        std::io::copy(&mut reader, &mut writer)?;
    }
    Ok(())
}

/// Splits a corpus so that `dst_tail` holds exactly the last `count` lines.
/// Reads the whole file.
pub fn split(path: &Path, dst_head: &Path, dst_tail: &Path, count: usize) -> Result<(), Error> {
    let lines = read_lines(path)?;
    let cut = lines.len().saturating_sub(count);
    write_lines(dst_head, &lines[..cut])?;
    write_lines(dst_tail, &lines[cut..])?;
    Ok(())
}

/// Samples `count` lines without replacement. Reads the whole file.
pub fn sample(path: &Path, count: usize, seed: u64) -> Result<Vec<String>, Error> {
    let lines = read_lines(path)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(lines
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect())
}

/// Deterministically shuffles a corpus. The same seed must be used on both
/// sides of a parallel corpus to keep the alignment. Reads the whole file.
pub fn shuffle(path: &Path, dst: &Path, seed: u64) -> Result<(), Error> {
    let mut lines = read_lines(path)?;
    let mut rng = StdRng::seed_from_u64(seed);
    lines.shuffle(&mut rng);
    write_lines(dst, &lines)
}

/// Token frequencies over a corpus, streamed.
pub fn token_counter(path: &Path) -> Result<HashMap<String, usize>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let counter = itertools::process_results(reader.lines(), |lines| {
        lines
            .flat_map(|line| {
                line.split_whitespace()
                    .map(String::from)
                    .collect::<Vec<String>>()
            })
            .counts()
    })?;
    Ok(counter)
}

/// Sentence-length frequencies over a corpus, streamed.
pub fn sentence_length_counter(path: &Path) -> Result<HashMap<usize, usize>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let counter = itertools::process_results(reader.lines(), |lines| {
        lines.map(|line| line.split_whitespace().count()).counts()
    })?;
    Ok(counter)
}

/// Builds a known-token whitelist from a trusted corpus: every token seen
/// at least `min_count` times.
pub fn known_tokens(path: &Path, min_count: usize) -> Result<HashSet<String>, Error> {
    Ok(token_counter(path)?
        .into_iter()
        .filter(|(_, n)| *n >= min_count)
        .map(|(token, _)| token)
        .collect())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub total: usize,
    pub removed: usize,
}

/// Order-preserving removal of duplicate lines. The seen-set is threaded
/// through the fold explicitly and handed back with the result, so a
/// caller can dedup several corpora against each other.
pub fn dedup<I>(lines: I, seen: HashSet<String>) -> (Vec<String>, HashSet<String>, DedupStats)
where
    I: IntoIterator<Item = String>,
{
    let (kept, seen, stats) = lines.into_iter().fold(
        (Vec::new(), seen, DedupStats::default()),
        |(mut kept, mut seen, mut stats), line| {
            stats.total += 1;
            if seen.contains(&line) {
                stats.removed += 1;
            } else {
                seen.insert(line.clone());
                kept.push(line);
            }
            (kept, seen, stats)
        },
    );
    info!("dedup total={} removed={}", stats.total, stats.removed);
    (kept, seen, stats)
}

/// Escapes the decoder's reserved characters in each token for corpus
/// emission. The sentence-level sibling is [crate::rules::placeholders].
pub fn escape_moses_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| apply(t, &MOSES_ESCAPE)).collect()
}
