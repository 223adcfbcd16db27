/*! Tokenizer and detokenizer dispatch.

Supported (language, method) combinations form a closed table; anything
else is a configuration error, surfaced immediately. Concrete tokenizers
are expensive to build (compiled rule lists, vocabulary files), so they are
constructed at most once per (language, method[, model path]) and shared
through [Tokenizers], an explicit cache that callers pass around instead of
global state.
!*/
mod detok;
mod icelandic;
mod rulesets;
mod subword;

pub use detok::{pre_detokenize, Detokenizer};
pub use icelandic::{shallow_tokenize, DeepTokenizer, Variant};
pub use rulesets::RuleTokenizer;
pub use subword::{join_subwords, SubwordTokenizer};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::lang::Lang;

/// Tokenization methods. `Subword` carries its vocabulary path, which is
/// part of the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Shallow,
    PassThrough,
    Placeholders,
    Moses,
    Toktok,
    Treebank,
    Subword(PathBuf),
}

impl Method {
    /// Parses a method name from the command line; `subword` requires a
    /// vocabulary path.
    pub fn parse(name: &str, model: Option<&Path>) -> Result<Self, Error> {
        match name {
            "shallow" => Ok(Method::Shallow),
            "pass-through" => Ok(Method::PassThrough),
            "placeholders" => Ok(Method::Placeholders),
            "moses" => Ok(Method::Moses),
            "toktok" => Ok(Method::Toktok),
            "treebank" => Ok(Method::Treebank),
            "subword" => match model {
                Some(path) => Ok(Method::Subword(path.to_path_buf())),
                None => Err(Error::Custom(
                    "method=subword requires a vocabulary path".to_string(),
                )),
            },
            other => Err(Error::Custom(format!("unknown method={}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Shallow => "shallow",
            Method::PassThrough => "pass-through",
            Method::Placeholders => "placeholders",
            Method::Moses => "moses",
            Method::Toktok => "toktok",
            Method::Treebank => "treebank",
            Method::Subword(_) => "subword",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A constructed tokenizer, ready to apply to any number of sentences.
#[derive(Debug)]
pub enum Tokenizer {
    Shallow,
    Deep(DeepTokenizer),
    Rules(RuleTokenizer),
    Subword(SubwordTokenizer),
}

impl Tokenizer {
    pub fn tokenize(&self, sent: &str) -> Vec<String> {
        match self {
            Tokenizer::Shallow => shallow_tokenize(sent),
            Tokenizer::Deep(t) => t.tokenize(sent),
            Tokenizer::Rules(t) => t.tokenize(sent),
            Tokenizer::Subword(t) => t.tokenize(sent),
        }
    }

    /// Tokenizes and joins with single spaces, the corpus line form.
    pub fn tokenize_line(&self, sent: &str) -> String {
        self.tokenize(sent).join(" ")
    }
}

fn build_tokenizer(lang: Lang, method: &Method) -> Result<Tokenizer, Error> {
    match (lang, method) {
        (Lang::Is, Method::Shallow) => Ok(Tokenizer::Shallow),
        (Lang::Is, Method::PassThrough) => {
            Ok(Tokenizer::Deep(DeepTokenizer::new(Variant::PassThrough)))
        }
        (Lang::Is, Method::Placeholders) => {
            Ok(Tokenizer::Deep(DeepTokenizer::new(Variant::Placeholders)))
        }
        (Lang::Is, Method::Moses) | (Lang::En, Method::Moses) => Ok(Tokenizer::Rules(
            RuleTokenizer::new(rulesets::moses_rules()),
        )),
        (Lang::En, Method::Toktok) => Ok(Tokenizer::Rules(RuleTokenizer::new(
            rulesets::toktok_rules(),
        ))),
        (Lang::En, Method::Treebank) => Ok(Tokenizer::Rules(RuleTokenizer::new(
            rulesets::treebank_rules(),
        ))),
        (_, Method::Subword(path)) => Ok(Tokenizer::Subword(SubwordTokenizer::from_vocab_file(
            path,
        )?)),
        (lang, method) => Err(Error::UnsupportedMethod {
            lang,
            method: method.to_string(),
        }),
    }
}

fn build_detokenizer(lang: Lang, method: &Method) -> Result<Detokenizer, Error> {
    match (lang, method) {
        (Lang::En, Method::Moses) => Ok(Detokenizer::Moses),
        (Lang::Is, Method::Shallow) => Ok(Detokenizer::Shallow),
        (_, Method::Subword(_)) => Ok(Detokenizer::Subword),
        (lang, method) => Err(Error::UnsupportedMethod {
            lang,
            method: method.to_string(),
        }),
    }
}

/// Process-wide tokenizer/detokenizer cache. Append-only: entries are
/// constructed once under the lock and never evicted.
#[derive(Default)]
pub struct Tokenizers {
    tokenizers: Mutex<HashMap<(Lang, Method), Arc<Tokenizer>>>,
    detokenizers: Mutex<HashMap<(Lang, Method), Arc<Detokenizer>>>,
}

impl Tokenizers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokenizer(&self, lang: Lang, method: &Method) -> Result<Arc<Tokenizer>, Error> {
        let mut cache = self.tokenizers.lock().unwrap();
        if let Some(tok) = cache.get(&(lang, method.clone())) {
            return Ok(Arc::clone(tok));
        }
        let tok = Arc::new(build_tokenizer(lang, method)?);
        cache.insert((lang, method.clone()), Arc::clone(&tok));
        Ok(tok)
    }

    /// Same discipline as [Tokenizers::tokenizer]. Pairing the result with
    /// a token stream produced by another method is not validated.
    pub fn detokenizer(&self, lang: Lang, method: &Method) -> Result<Arc<Detokenizer>, Error> {
        let mut cache = self.detokenizers.lock().unwrap();
        if let Some(detok) = cache.get(&(lang, method.clone())) {
            return Ok(Arc::clone(detok));
        }
        let detok = Arc::new(build_detokenizer(lang, method)?);
        cache.insert((lang, method.clone()), Arc::clone(&detok));
        Ok(detok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_combination_fails_fast() {
        let cache = Tokenizers::new();
        assert!(matches!(
            cache.tokenizer(Lang::En, &Method::PassThrough),
            Err(Error::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            cache.tokenizer(Lang::En, &Method::Shallow),
            Err(Error::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            cache.detokenizer(Lang::Is, &Method::Toktok),
            Err(Error::UnsupportedMethod { .. })
        ));
    }

    #[test]
    fn instances_are_cached() {
        let cache = Tokenizers::new();
        let a = cache.tokenizer(Lang::Is, &Method::PassThrough).unwrap();
        let b = cache.tokenizer(Lang::Is, &Method::PassThrough).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn caches_are_independent() {
        // a fresh cache holds no instances from another one
        let first = Tokenizers::new();
        let _ = first.tokenizer(Lang::En, &Method::Moses).unwrap();
        let second = Tokenizers::new();
        assert!(second.tokenizers.lock().unwrap().is_empty());
    }

    #[test]
    fn supported_methods_per_language() {
        let cache = Tokenizers::new();
        for method in [Method::Shallow, Method::PassThrough, Method::Placeholders, Method::Moses] {
            assert!(cache.tokenizer(Lang::Is, &method).is_ok());
        }
        for method in [Method::Moses, Method::Toktok, Method::Treebank] {
            assert!(cache.tokenizer(Lang::En, &method).is_ok());
        }
    }
}
