/*! Bulk translation orchestration.

Wraps the preprocessing chain, a remote decoder call and the inverse
postprocessing chain, one concurrent task per sentence. Tasks are
gathered positionally so the returned translations match submission
order, and the whole batch runs under a single aggregate timeout: an
elapsed timeout is an explicit error, never an empty success.
!*/
mod api;
mod config;

pub use api::{EngineRequest, EngineResponse, TranslateRequest, TranslateResponse, Translation};
pub use config::{Config, Endpoint, Version};

use std::future::Future;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use log::{error, info};

use crate::error::Error;
use crate::lang::Lang;
use crate::normalize::lowercase_normalize;
use crate::rules::{
    self, placeholders, BRACKET_CLOSE, BRACKET_OPEN, EMPTY_BRACKETS, FIX_PLACEHOLDERS, GT, LT,
    PIPE, URI, URI_SIMPLE,
};
use crate::tokenizing::{pre_detokenize, Method, Tokenizers};
use crate::truecasing::{detruecase, TruecaseModel, TruecaseModels};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn tokenize_method(lang: Lang, version: Version) -> Method {
    match (lang, version) {
        (Lang::En, Version::V1) => Method::Toktok,
        (Lang::En, Version::V2) => Method::Moses,
        (Lang::Is, _) => Method::PassThrough,
    }
}

/// Sentence preprocessing as deployed models expect it:
/// normalize, URI/bracket rules, tokenize, placeholder fix-up and
/// reserved-character escaping, then truecasing when a model is
/// configured for the language.
pub fn preprocess(
    sent: &str,
    lang: Lang,
    version: Version,
    tokenizers: &Tokenizers,
    truecase: Option<&TruecaseModel>,
) -> Result<String, Error> {
    let sent = lowercase_normalize(sent);
    let pre_rules = match version {
        Version::V1 => vec![URI.clone(), EMPTY_BRACKETS.clone()],
        Version::V2 => vec![URI.clone(), URI_SIMPLE.clone(), EMPTY_BRACKETS.clone()],
    };
    let sent = rules::apply(&sent, &pre_rules);

    let tokenizer = tokenizers.tokenizer(lang, &tokenize_method(lang, version))?;
    let sent = tokenizer.tokenize_line(&sent);

    let post_rules = [
        PIPE.clone(),
        FIX_PLACEHOLDERS.clone(),
        LT.clone(),
        GT.clone(),
        BRACKET_OPEN.clone(),
        BRACKET_CLOSE.clone(),
    ];
    let sent = rules::apply(&sent, &post_rules);

    Ok(match truecase {
        Some(model) => model.truecase(&sent),
        None => sent,
    })
}

/// Inverse chain applied to decoder output: unescape the placeholder
/// markers, restore default casing, detokenize.
pub fn postprocess(sent: &str, lang: Lang, tokenizers: &Tokenizers) -> Result<String, Error> {
    let sent = placeholders::unescape(sent);
    let sent = detruecase(&sent);
    let (method, sent) = match lang {
        Lang::En => (Method::Moses, pre_detokenize(&sent)),
        Lang::Is => (Method::Shallow, sent),
    };
    let detokenizer = tokenizers.detokenizer(lang, &method)?;
    let tokens: Vec<String> = sent.split_whitespace().map(String::from).collect();
    Ok(detokenizer.detokenize(&tokens))
}

/// Gathers per-sentence tasks positionally under one aggregate deadline.
async fn gather_with_timeout<F>(tasks: Vec<F>, timeout_secs: u64) -> Result<Vec<String>, Error>
where
    F: Future<Output = Result<String, Error>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), try_join_all(tasks)).await {
        Ok(gathered) => gathered,
        Err(_) => Err(Error::TranslationTimeout(timeout_secs)),
    }
}

pub struct Translator<'a> {
    config: &'a Config,
    tokenizers: &'a Tokenizers,
    truecase_models: &'a TruecaseModels,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl<'a> Translator<'a> {
    pub fn new(
        config: &'a Config,
        tokenizers: &'a Tokenizers,
        truecase_models: &'a TruecaseModels,
        timeout_secs: u64,
    ) -> Self {
        Translator {
            config,
            tokenizers,
            truecase_models,
            client: reqwest::Client::new(),
            timeout_secs,
        }
    }

    /// Translates the sentences concurrently through the model's endpoint.
    /// The result vector matches the submission order. A timeout of the
    /// aggregate batch surfaces as [Error::TranslationTimeout]; any failed
    /// task aborts the batch.
    pub async fn translate_bulk(
        &self,
        sentences: &[String],
        s_lang: Lang,
        t_lang: Lang,
        model: &str,
        id: &str,
    ) -> Result<Vec<String>, Error> {
        let endpoint = self.config.endpoint(model)?;
        let truecase = match self.config.truecase.get(&s_lang) {
            Some(path) => Some(self.truecase_models.get(path)?),
            None => None,
        };
        let start = Instant::now();
        let tasks: Vec<_> = sentences
            .iter()
            .enumerate()
            .map(|(idx, sent)| {
                self.translate(sent, s_lang, t_lang, endpoint, truecase.as_deref(), id, idx)
            })
            .collect();
        let result = gather_with_timeout(tasks, self.timeout_secs).await;
        match &result {
            Ok(translated) => info!(
                "bulk translation id={}: sentences={} took={:.2}",
                id,
                translated.len(),
                start.elapsed().as_secs_f64()
            ),
            Err(Error::TranslationTimeout(secs)) => {
                error!("translation timed out id={} after={}s", id, secs)
            }
            Err(e) => error!("bulk translation failed id={}: {:?}", id, e),
        }
        result
    }

    /// Fills the public boundary shape from a bulk run.
    pub async fn translate_request(
        &self,
        request: &TranslateRequest,
        id: &str,
    ) -> Result<TranslateResponse, Error> {
        let s_lang: Lang = request.source_language_code.parse()?;
        let t_lang: Lang = request.target_language_code.parse()?;
        let translated = self
            .translate_bulk(&request.contents, s_lang, t_lang, &request.model, id)
            .await?;
        Ok(TranslateResponse {
            translations: translated
                .into_iter()
                .map(|text| Translation {
                    translated_text: text,
                    model: request.model.clone(),
                })
                .collect(),
        })
    }

    async fn translate(
        &self,
        sent: &str,
        s_lang: Lang,
        t_lang: Lang,
        endpoint: &Endpoint,
        truecase: Option<&TruecaseModel>,
        id: &str,
        idx: usize,
    ) -> Result<String, Error> {
        info!("translation id={}#{}: source={}", id, idx, sent);
        let sentence = preprocess(sent, s_lang, endpoint.version, self.tokenizers, truecase)?;
        info!("translation id={}#{}: preprocessed={}", id, idx, sentence);

        let start = Instant::now();
        let response: EngineResponse = self
            .client
            .post(&endpoint.url)
            .json(&EngineRequest { text: sentence })
            .send()
            .await?
            .json()
            .await?;
        info!(
            "translation id={}#{}: took={:.2}",
            id,
            idx,
            start.elapsed().as_secs_f64()
        );

        let translated = postprocess(&response.text, t_lang, self.tokenizers)?;
        info!("translation id={}#{}: postprocessed={}", id, idx, translated);
        Ok(translated)
    }
}
