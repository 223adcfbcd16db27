//! Wire types.
//!
//! [TranslateRequest]/[TranslateResponse] are the shapes of the public
//! `POST /translateText` boundary the orchestrator fills; the engine
//! types are the single-sentence RPC spoken to a deployed decoder.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub contents: Vec<String>,
    #[serde(rename = "sourceLanguageCode")]
    pub source_language_code: String,
    #[serde(rename = "targetLanguageCode")]
    pub target_language_code: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translations: Vec<Translation>,
}

/// Single-sentence request to the decoder endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EngineResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_field_names() {
        let req = TranslateRequest {
            contents: vec!["halló".to_string()],
            source_language_code: "is".to_string(),
            target_language_code: "en".to_string(),
            model: "baseline".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["sourceLanguageCode"], "is");
        assert_eq!(json["targetLanguageCode"], "en");
        assert_eq!(json["contents"][0], "halló");
    }

    #[test]
    fn response_field_names() {
        let json = r#"{"translations":[{"translatedText":"hello","model":"baseline"}]}"#;
        let resp: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.translations[0].translated_text, "hello");
    }
}
