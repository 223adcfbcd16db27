//! # Ormstunga
//!
//! Corpus preprocessing pipeline for the EN-IS machine translation
//! systems: normalization, tokenization, truecasing, quality filtering and
//! bulk translation against deployed decoder endpoints.
//!
//! Corpus commands read a line-oriented corpus file and write a new one,
//! exiting non-zero with the failing stage named on any unrecoverable
//! error.
use std::str::FromStr;

use structopt::StructOpt;

#[macro_use]
extern crate log;

use ormstunga::batch;
use ormstunga::cli;
use ormstunga::corpus;
use ormstunga::error::Error;
use ormstunga::filtering::{anchored, drop_lines, get_drop_lines, DropCriteria};
use ormstunga::lang::Lang;
use ormstunga::normalize::lowercase_normalize;
use ormstunga::tokenizing::{Method, Tokenizers};
use ormstunga::translate::{preprocess, Config, Translator, Version};
use ormstunga::truecasing::{self, detruecase, TruecaseModels};

fn stage<T>(name: &'static str, result: Result<T, Error>) -> Result<T, Error> {
    result.map_err(|e| {
        error!("stage {} failed", name);
        Error::Custom(format!("{}: {:?}", name, e))
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Ormstunga::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Ormstunga::Normalize(args) => {
            let count = stage(
                "normalize",
                batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
                    Ok(lowercase_normalize(line))
                }),
            )?;
            println!("normalized lines={}", count);
        }

        cli::Ormstunga::Tokenize(args) => {
            let count = stage("tokenize", tokenize_cmd(&args))?;
            println!("tokenized lines={}", count);
        }

        cli::Ormstunga::Detokenize(args) => {
            let count = stage("detokenize", detokenize_cmd(&args))?;
            println!("detokenized lines={}", count);
        }

        cli::Ormstunga::TrainTruecase(args) => {
            stage("train-truecase", train_truecase_cmd(&args))?;
            println!("wrote model={}", args.save_to.display());
        }

        cli::Ormstunga::Truecase(args) => {
            let models = TruecaseModels::new();
            let model = stage("truecase", models.get(&args.model))?;
            let count = stage(
                "truecase",
                batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
                    Ok(model.truecase(line))
                }),
            )?;
            println!("truecased lines={}", count);
        }

        cli::Ormstunga::Detruecase(args) => {
            let count = stage(
                "detruecase",
                batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
                    Ok(detruecase(line))
                }),
            )?;
            println!("detruecased lines={}", count);
        }

        cli::Ormstunga::Repair(args) => {
            let repair = [ormstunga::rules::IS_SPLIT_NEWLINE.clone()];
            let count = stage(
                "repair",
                batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
                    Ok(ormstunga::rules::apply(line, &repair))
                }),
            )?;
            println!("repaired lines={}", count);
        }

        cli::Ormstunga::Filter(args) => {
            let (total, dropped) = stage("filter", filter_cmd(&args))?;
            let fraction = if total == 0 {
                0.0
            } else {
                dropped as f64 / total as f64
            };
            println!(
                "lines total={} dropped={} fraction={:.4}",
                total, dropped, fraction
            );
        }

        cli::Ormstunga::Dedup(args) => {
            let lines = stage("dedup", batch::read_lines(&args.src))?;
            let total = lines.len();
            let (kept, _, stats) =
                corpus::dedup(lines, std::collections::HashSet::new());
            stage("dedup", batch::write_lines(&args.dst, &kept))?;
            println!("lines total={} removed={}", total, stats.removed);
        }

        cli::Ormstunga::Info(args) => {
            for path in &args.paths {
                let line = stage("info", corpus::info_formatted(path))?;
                println!("{}", line);
            }
        }

        cli::Ormstunga::Combine(args) => {
            stage("combine", corpus::combine(&args.srcs, &args.dst))?;
            let count = stage("combine", corpus::line_count(&args.dst))?;
            println!("combined files={} lines={}", args.srcs.len(), count);
        }

        cli::Ormstunga::Split(args) => {
            stage(
                "split",
                corpus::split(&args.src, &args.dst_head, &args.dst_tail, args.tail_size),
            )?;
            let head = stage("split", corpus::line_count(&args.dst_head))?;
            let tail = stage("split", corpus::line_count(&args.dst_tail))?;
            println!("head lines={} tail lines={}", head, tail);
        }

        cli::Ormstunga::Sample(args) => {
            let lines = stage("sample", corpus::sample(&args.src, args.count, args.seed))?;
            for line in &lines {
                println!("{}", line);
            }
        }

        cli::Ormstunga::Shuffle(args) => {
            stage("shuffle", corpus::shuffle(&args.src, &args.dst, args.seed))?;
            let count = stage("shuffle", corpus::line_count(&args.dst))?;
            println!("shuffled lines={}", count);
        }

        cli::Ormstunga::Peek(args) => {
            let lines = stage("peek", corpus::peek(&args.src, args.length))?;
            for line in &lines {
                println!("{}", line);
            }
        }

        cli::Ormstunga::Preprocess(args) => {
            let sent = stage("preprocess", preprocess_cmd(&args))?;
            println!("{}", sent);
        }

        cli::Ormstunga::Translate(args) => {
            let count = stage("translate", translate_cmd(&args).await)?;
            println!("translated lines={}", count);
        }
    };
    Ok(())
}

fn tokenize_cmd(args: &cli::Tokenize) -> Result<usize, Error> {
    let lang: Lang = args.lang.parse()?;
    let method = Method::parse(&args.method, args.model.as_deref())?;
    let tokenizers = Tokenizers::new();
    let tokenizer = tokenizers.tokenizer(lang, &method)?;
    info!("tokenizing lang={} method={}", lang, method);
    batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
        Ok(tokenizer.tokenize_line(line))
    })
}

fn detokenize_cmd(args: &cli::Detokenize) -> Result<usize, Error> {
    let lang: Lang = args.lang.parse()?;
    let method = Method::parse(&args.method, args.model.as_deref())?;
    let tokenizers = Tokenizers::new();
    let detokenizer = tokenizers.detokenizer(lang, &method)?;
    info!("detokenizing lang={} method={}", lang, method);
    batch::run_on_file(&args.src, &args.dst, args.threads, args.chunk_size, |line| {
        let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        Ok(detokenizer.detokenize(&tokens))
    })
}

fn train_truecase_cmd(args: &cli::TrainTruecase) -> Result<(), Error> {
    let lines = batch::read_lines(&args.src)?;
    let corpus: Vec<Vec<String>> = lines
        .iter()
        .map(|line| line.split_whitespace().map(String::from).collect())
        .collect();
    info!("training truecase model on sentences={}", corpus.len());
    truecasing::train(&corpus, &args.save_to, args.threads)
}

fn filter_cmd(args: &cli::Filter) -> Result<(usize, usize), Error> {
    let known_tokens = match &args.known_corpus {
        Some(path) => corpus::known_tokens(path, args.min_count)?,
        None => Default::default(),
    };
    let mut blacklist = args
        .blacklist
        .iter()
        .map(|pattern| anchored(pattern))
        .collect::<Result<Vec<_>, Error>>()?;
    if args.drop_foreign_scripts {
        blacklist.push(ormstunga::rules::CYRILLIC.clone());
        blacklist.push(ormstunga::rules::GREEK.clone());
        blacklist.push(ormstunga::rules::UNKNOWN_CHARS.clone());
    }
    let criteria = DropCriteria {
        blacklist,
        known_tokens,
        keep_ratio: args.keep_ratio,
        normalize: !args.no_normalize,
        keep_sent_length: args.keep_sent_length,
    };
    let lines = batch::read_lines(&args.src)?;
    let drops = get_drop_lines(&lines, &criteria, args.threads, args.chunk_size)?;
    let numbers: Vec<usize> = drops.iter().map(|(n, _, _)| *n).collect();
    drop_lines(&args.src, &args.dst, &numbers)?;
    Ok((lines.len(), numbers.len()))
}

fn preprocess_cmd(args: &cli::Preprocess) -> Result<String, Error> {
    let lang: Lang = args.lang.parse()?;
    let version = Version::from_str(&args.version)?;
    let config = Config::from_env()?;
    let tokenizers = Tokenizers::new();
    let models = TruecaseModels::new();
    let truecase = match config.truecase.get(&lang) {
        Some(path) => Some(models.get(path)?),
        None => None,
    };
    preprocess(&args.sent, lang, version, &tokenizers, truecase.as_deref())
}

async fn translate_cmd(args: &cli::Translate) -> Result<usize, Error> {
    let s_lang: Lang = args.source_lang.parse()?;
    let t_lang: Lang = args.target_lang.parse()?;
    let config = Config::from_env()?;
    let tokenizers = Tokenizers::new();
    let models = TruecaseModels::new();
    let translator = Translator::new(&config, &tokenizers, &models, args.timeout);

    let sentences = batch::read_lines(&args.src)?;
    let translated = translator
        .translate_bulk(&sentences, s_lang, t_lang, &args.model, &args.id)
        .await?;
    batch::write_lines(&args.dst, &translated)?;
    Ok(translated.len())
}
