//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "ormstunga", about = "EN-IS corpus preprocessing tool.")]
/// Holds every command that is callable by the `ormstunga` command.
pub enum Ormstunga {
    #[structopt(about = "Lowercase and unicode-normalize a corpus")]
    Normalize(Normalize),
    #[structopt(about = "Tokenize a corpus")]
    Tokenize(Tokenize),
    #[structopt(about = "Detokenize a tokenized corpus")]
    Detokenize(Detokenize),
    #[structopt(about = "Train a truecase model from a tokenized corpus")]
    TrainTruecase(TrainTruecase),
    #[structopt(about = "Apply a truecase model to a tokenized corpus")]
    Truecase(Truecase),
    #[structopt(about = "Restore default casing on a truecased corpus")]
    Detruecase(Detruecase),
    #[structopt(about = "Repair glued sentence boundaries in a corpus")]
    Repair(Repair),
    #[structopt(about = "Drop noisy lines from a corpus")]
    Filter(Filter),
    #[structopt(about = "Remove duplicate lines, keeping the first occurrence")]
    Dedup(Dedup),
    #[structopt(about = "Print path, size and line count of corpora")]
    Info(Info),
    #[structopt(about = "Concatenate corpora into one file")]
    Combine(Combine),
    #[structopt(about = "Split a corpus into a head and a fixed-size tail")]
    Split(Split),
    #[structopt(about = "Print a random sample of lines from a corpus")]
    Sample(Sample),
    #[structopt(about = "Shuffle a corpus deterministically")]
    Shuffle(Shuffle),
    #[structopt(about = "Print the first lines of a corpus")]
    Peek(Peek),
    #[structopt(about = "Preprocess a single sentence for a given version")]
    Preprocess(Preprocess),
    #[structopt(about = "Translate a corpus through a configured model endpoint")]
    Translate(Translate),
}

#[derive(Debug, StructOpt)]
pub struct Normalize {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(
        help = "number of lines in a worker chunk.",
        long = "chunk_size",
        default_value = "4000",
        short = "s"
    )]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Tokenize {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(short = "l", long = "lang", help = "corpus language (en/is)")]
    pub lang: String,
    #[structopt(
        short = "m",
        long = "method",
        help = "tokenization method (shallow, pass-through, placeholders, moses, toktok, treebank, subword)"
    )]
    pub method: String,
    #[structopt(
        parse(from_os_str),
        long = "model",
        help = "vocabulary path for method=subword"
    )]
    pub model: Option<PathBuf>,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Detokenize {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(short = "l", long = "lang", help = "corpus language (en/is)")]
    pub lang: String,
    #[structopt(short = "m", long = "method", help = "detokenization method")]
    pub method: String,
    #[structopt(parse(from_os_str), long = "model")]
    pub model: Option<PathBuf>,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct TrainTruecase {
    #[structopt(parse(from_os_str), help = "tokenized training corpus")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "where to write the model")]
    pub save_to: PathBuf,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
}

#[derive(Debug, StructOpt)]
pub struct Truecase {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(parse(from_os_str), long = "model", help = "truecase model path")]
    pub model: PathBuf,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Detruecase {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Repair {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Filter {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "known-corpus",
        help = "trusted corpus the known-token whitelist is built from"
    )]
    pub known_corpus: Option<PathBuf>,
    #[structopt(
        long = "min-count",
        default_value = "1",
        help = "minimum occurrences for a token to count as known"
    )]
    pub min_count: usize,
    #[structopt(long = "blacklist", help = "drop lines starting with these patterns")]
    pub blacklist: Vec<String>,
    #[structopt(long = "keep-ratio", default_value = "0.5")]
    pub keep_ratio: f64,
    #[structopt(
        long = "keep-sent-length",
        default_value = "1",
        help = "sentences this short are always kept"
    )]
    pub keep_sent_length: usize,
    #[structopt(long = "no-normalize", help = "do not reduce lines to plain words first")]
    pub no_normalize: bool,
    #[structopt(
        long = "drop-foreign-scripts",
        help = "also drop lines carrying cyrillic, greek or other foreign characters"
    )]
    pub drop_foreign_scripts: bool,
    #[structopt(short = "t", long = "threads", default_value = "4")]
    pub threads: usize,
    #[structopt(long = "chunk_size", default_value = "4000", short = "s")]
    pub chunk_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Dedup {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Info {
    #[structopt(parse(from_os_str), help = "corpus locations")]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Combine {
    #[structopt(parse(from_os_str), help = "source corpus locations, concatenated in order")]
    pub srcs: Vec<PathBuf>,
    #[structopt(parse(from_os_str), long = "dst", help = "destination corpus location")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Split {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of the head lines")]
    pub dst_head: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of the tail lines")]
    pub dst_tail: PathBuf,
    #[structopt(
        long = "tail-size",
        default_value = "2000",
        help = "exact number of lines in the tail"
    )]
    pub tail_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Sample {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(short = "n", long = "count", default_value = "10")]
    pub count: usize,
    #[structopt(long = "seed", default_value = "42")]
    pub seed: u64,
}

#[derive(Debug, StructOpt)]
pub struct Shuffle {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(
        long = "seed",
        default_value = "42",
        help = "use the same seed on both sides of a parallel corpus"
    )]
    pub seed: u64,
}

#[derive(Debug, StructOpt)]
pub struct Peek {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(short = "n", long = "length", default_value = "10")]
    pub length: usize,
}

#[derive(Debug, StructOpt)]
pub struct Preprocess {
    #[structopt(help = "the sentence to preprocess")]
    pub sent: String,
    #[structopt(default_value = "is", help = "sentence language (en/is)")]
    pub lang: String,
    #[structopt(default_value = "v2", help = "preprocessing version (v1/v2)")]
    pub version: String,
}

#[derive(Debug, StructOpt)]
pub struct Translate {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(long = "source-lang", help = "source language (en/is)")]
    pub source_lang: String,
    #[structopt(long = "target-lang", help = "target language (en/is)")]
    pub target_lang: String,
    #[structopt(long = "model", help = "model name, resolved through MODEL_* variables")]
    pub model: String,
    #[structopt(long = "timeout", default_value = "60", help = "batch timeout in seconds")]
    pub timeout: u64,
    #[structopt(long = "id", default_value = "bulk", help = "request id used in logs")]
    pub id: String,
}
