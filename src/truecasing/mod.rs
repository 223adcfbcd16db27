/*! Truecasing.

A truecase model maps each case-folded token to its most frequent surface
casing in a tokenized training corpus. Training is a batch operation over
the whole corpus; application is per sentence and happens millions of
times per batch, so loaded models are cached per path in [TruecaseModels].

Detruecasing is lossy-reversible: it restores a plausible default casing
(sentence-initial capitals), not the original one.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;

type CaseCounts = HashMap<String, HashMap<String, usize>>;

/// Preferred surface casing per folded token.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TruecaseModel {
    best: HashMap<String, String>,
}

fn fold(token: &str) -> String {
    token.to_lowercase()
}

fn count_sentence(counts: &mut CaseCounts, tokens: &[String]) {
    for (i, token) in tokens.iter().enumerate() {
        // the casing of a sentence-initial token is positional, not
        // lexical; only trust it when it carries no capitals
        if i == 0 && token.chars().any(|c| c.is_uppercase()) {
            continue;
        }
        *counts
            .entry(fold(token))
            .or_default()
            .entry(token.clone())
            .or_insert(0) += 1;
    }
}

fn merge_counts(mut into: CaseCounts, from: CaseCounts) -> CaseCounts {
    for (key, surfaces) in from {
        let entry = into.entry(key).or_default();
        for (surface, n) in surfaces {
            *entry.entry(surface).or_insert(0) += n;
        }
    }
    into
}

impl TruecaseModel {
    /// Collects casing statistics over a tokenized corpus. `workers` bounds
    /// the statistics-collection pool.
    pub fn train(corpus: &[Vec<String>], workers: usize) -> Result<Self, Error> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()?;
        let counts = pool.install(|| {
            corpus
                .par_iter()
                .fold(CaseCounts::default, |mut acc, tokens| {
                    count_sentence(&mut acc, tokens);
                    acc
                })
                .reduce(CaseCounts::default, merge_counts)
        });
        let best = counts
            .into_iter()
            .filter_map(|(key, surfaces)| {
                surfaces
                    .into_iter()
                    // highest count wins, lexicographic tie-break for
                    // deterministic models
                    .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
                    .map(|(surface, _)| (key, surface))
            })
            .collect();
        Ok(TruecaseModel { best })
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        info!("wrote truecase model={:?} entries={}", path, self.best.len());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::MissingModel(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Restores each token's preferred casing; unknown tokens pass through.
    /// An empty token sequence yields an empty result.
    pub fn truecase_tokens(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| {
                self.best
                    .get(&fold(token))
                    .cloned()
                    .unwrap_or_else(|| token.clone())
            })
            .collect()
    }

    pub fn truecase(&self, sent: &str) -> String {
        let tokens: Vec<String> = sent.split_whitespace().map(String::from).collect();
        self.truecase_tokens(&tokens).join(" ")
    }
}

/// Trains on a tokenized corpus and persists the model in one step.
pub fn train(corpus: &[Vec<String>], save_to: &Path, workers: usize) -> Result<(), Error> {
    TruecaseModel::train(corpus, workers)?.save(save_to)
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Uppercases the first token and every token following sentence-final
/// punctuation. The inverse of truecasing only up to a default casing.
pub fn detruecase(sent: &str) -> String {
    let mut out = Vec::new();
    let mut capitalize_next = true;
    for token in sent.split_whitespace() {
        if capitalize_next && token.chars().next().map_or(false, |c| c.is_alphabetic()) {
            out.push(capitalize(token));
            capitalize_next = false;
        } else {
            out.push(token.to_string());
        }
        if matches!(token, "." | "!" | "?") {
            capitalize_next = true;
        }
    }
    out.join(" ")
}

/// Per-path cache of loaded truecase models. Loading reads the whole model
/// file, so it happens at most once per path.
#[derive(Default)]
pub struct TruecaseModels {
    models: Mutex<HashMap<PathBuf, Arc<TruecaseModel>>>,
}

impl TruecaseModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Result<Arc<TruecaseModel>, Error> {
        let mut cache = self.models.lock().unwrap();
        if let Some(model) = cache.get(path) {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(TruecaseModel::load(path)?);
        cache.insert(path.to_path_buf(), Arc::clone(&model));
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(lines: &[&str]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|l| l.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn prefers_most_frequent_casing() {
        let corpus = corpus(&[
            "við fórum til Reykjavíkur í gær",
            "hann býr í Reykjavíkur",
            "hér stendur reykjavíkur einu sinni",
        ]);
        let model = TruecaseModel::train(&corpus, 2).unwrap();
        assert_eq!(model.truecase("reykjavíkur er falleg"), "Reykjavíkur er falleg");
    }

    #[test]
    fn sentence_initial_capitals_are_distrusted() {
        let corpus = corpus(&["Hann kom heim", "ég sá hann þar", "þá fór hann út"]);
        let model = TruecaseModel::train(&corpus, 1).unwrap();
        // "Hann" was only seen capitalized sentence-initially
        assert_eq!(model.truecase("hann kom"), "hann kom");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let model = TruecaseModel::default();
        assert_eq!(model.truecase("óþekkt orð"), "óþekkt orð");
    }

    #[test]
    fn empty_input_empty_output() {
        let model = TruecaseModel::default();
        assert_eq!(model.truecase_tokens(&[]), Vec::<String>::new());
        assert_eq!(model.truecase(""), "");
    }

    #[test]
    fn save_load_round_trip() {
        let corpus = corpus(&["sjá EFTA og ESB", "um EFTA var rætt"]);
        let model = TruecaseModel::train(&corpus, 1).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truecase-model.is");
        model.save(&path).unwrap();

        let cache = TruecaseModels::new();
        let loaded = cache.get(&path).unwrap();
        assert_eq!(loaded.truecase("efta fundurinn"), "EFTA fundurinn");
        // second lookup is served from the cache
        let again = cache.get(&path).unwrap();
        assert!(Arc::ptr_eq(&loaded, &again));
    }

    #[test]
    fn missing_model_is_loud() {
        let cache = TruecaseModels::new();
        let err = cache.get(Path::new("/no/such/model")).unwrap_err();
        assert!(matches!(err, Error::MissingModel(_)));
    }

    #[test]
    fn detruecase_restores_default_casing() {
        assert_eq!(detruecase("þetta er setning . hún heldur áfram ."), "Þetta er setning . Hún heldur áfram .");
        assert_eq!(detruecase(""), "");
        assert_eq!(detruecase("„ tilvitnun hér"), "„ Tilvitnun hér");
    }
}
