//! Supported languages.
//!
//! The pipeline is limited to the English-Icelandic language pair.
//! Every language-sensitive stage takes a [Lang] so that unsupported
//! codes are rejected at the boundary rather than deep inside a batch.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// ISO 639-1 codes of the supported language pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Is,
}

impl Lang {
    /// two-letter code, also used as the corpus file extension.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Is => "is",
        }
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "is" => Ok(Lang::Is),
            other => Err(Error::UnknownLang(other.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
