//! Parallel batch processing.
//!
//! Corpus-scale work is CPU bound and data parallel: the input is split
//! into fixed-size chunks which are the unit of dispatch to a bounded
//! worker pool, and results are reassembled in input order. The whole
//! input lives in memory for the duration of a batch; corpora beyond
//! memory must be pre-sharded by the caller.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::error::Error;

/// Applies a pure line-to-line function over all lines on `workers`
/// threads, in `chunk_size` chunks, preserving input order in the output.
///
/// Any failing line aborts the whole batch; no partial result is returned.
pub fn run<T, F>(lines: &[String], workers: usize, chunk_size: usize, f: F) -> Result<Vec<T>, Error>
where
    T: Send,
    F: Fn(&str) -> Result<T, Error> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()?;
    let chunks: Vec<Vec<T>> = pool.install(|| {
        lines
            .par_chunks(chunk_size.max(1))
            .map(|chunk| -> Result<Vec<T>, Error> {
                chunk.iter().map(|line| f(line)).collect()
            })
            .collect::<Result<_, Error>>()
    })?;
    Ok(chunks.into_iter().flatten().collect())
}

/// Reads all lines of a file into memory.
pub fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    BufReader::new(File::open(path)?)
        .lines()
        .map(|line| line.map_err(Error::from))
        .collect()
}

/// Writes lines with trailing newlines.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// File-to-file variant of [run]: reads `src` whole, maps every line and
/// writes the result to `dst`. Returns the number of lines processed.
/// On failure nothing is written.
pub fn run_on_file<F>(
    src: &Path,
    dst: &Path,
    workers: usize,
    chunk_size: usize,
    f: F,
) -> Result<usize, Error>
where
    F: Fn(&str) -> Result<String, Error> + Sync,
{
    let lines = read_lines(src)?;
    let mapped = run(&lines, workers, chunk_size, f)?;
    write_lines(dst, &mapped)?;
    info!("processed lines={} src={:?} dst={:?}", mapped.len(), src, dst);
    Ok(mapped.len())
}
