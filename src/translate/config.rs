//! Endpoint configuration.
//!
//! Models are declared through environment variables, one endpoint per
//! model name:
//!
//! ```sh
//! export MODEL_en_is_baseline=http://localhost:8080/RPC2
//! export VERSION_en_is_baseline=v2
//! export TRUECASE_is=/models/truecase-model.form.is
//! ```
//!
//! declares a model `en-is-baseline` with preprocessing version v2 and an
//! Icelandic truecase model. The table is loaded once and passed into the
//! orchestrator explicitly.
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::lang::Lang;

/// Preprocessing recipe version tied to a deployed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// toktok English tokenization.
    V1,
    /// moses English tokenization and the looser URI pass.
    V2,
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Version::V1),
            "v2" => Ok(Version::V2),
            other => Err(Error::Custom(format!("unknown preprocessing version={}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub version: Version,
}

/// Translation endpoints and truecase model paths, keyed by model name and
/// source language respectively.
#[derive(Debug, Default)]
pub struct Config {
    pub models: HashMap<String, Endpoint>,
    pub truecase: HashMap<Lang, PathBuf>,
}

impl Config {
    /// Reads `MODEL_*`, `VERSION_*` and `TRUECASE_*` variables from the
    /// environment. Underscores in model names become dashes.
    pub fn from_env() -> Result<Self, Error> {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &[(String, String)]) -> Result<Self, Error> {
        let mut urls: HashMap<String, String> = HashMap::new();
        let mut versions: HashMap<String, Version> = HashMap::new();
        let mut truecase = HashMap::new();
        for (key, value) in vars {
            if let Some(name) = key.strip_prefix("MODEL_") {
                urls.insert(name.replace('_', "-"), value.clone());
            } else if let Some(name) = key.strip_prefix("VERSION_") {
                versions.insert(name.replace('_', "-"), value.parse()?);
            } else if let Some(lang) = key.strip_prefix("TRUECASE_") {
                truecase.insert(lang.parse::<Lang>()?, PathBuf::from(value));
            }
        }
        let models = urls
            .into_iter()
            .map(|(name, url)| {
                let version = versions.get(&name).copied().unwrap_or(Version::V2);
                (name, Endpoint { url, version })
            })
            .collect();
        let config = Config { models, truecase };
        debug!("configured models={:?}", config.models.keys().collect::<Vec<_>>());
        Ok(config)
    }

    pub fn endpoint(&self, model: &str) -> Result<&Endpoint, Error> {
        self.models
            .get(model)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }
}
