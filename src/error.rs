//! Error enum
use std::path::PathBuf;

use crate::lang::Lang;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Regex(regex::Error),
    Serde(serde_json::Error),
    Request(reqwest::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    UnknownLang(String),
    UnknownModel(String),
    UnsupportedMethod { lang: Lang, method: String },
    MissingModel(PathBuf),
    TranslationTimeout(u64),
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Request(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
