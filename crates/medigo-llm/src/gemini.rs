//! Gemini `generateContent` client.
//!
//! Blocking HTTP with a bounded timeout. Implements every collaborator trait; the
//! engines treat any error here as a reason to take their fallback path.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use medigo_core::ai::{
    AiError, AiResult, AlternativesSource, InterpretedQuery, PackagingIdentification, PackagingIdentifier,
    PrescriptionReader, QueryInterpreter,
};
use medigo_core::config::AiConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::extraction::{parse_identification, parse_interpretation, parse_name_list};
use crate::prompts::{
    identification_schema, interpretation_schema, make_alternatives_prompt, make_interpretation_prompt,
    string_list_schema, IMAGE_MIME_TYPE, PACKAGING_PROMPT, PRESCRIPTION_PROMPT,
};

pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: String, timeout_secs: u64) -> AiResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }

    /// Client from configuration; the API key is read from the configured env var.
    pub fn from_config(config: &AiConfig) -> AiResult<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AiError::NotConfigured(format!("{} is not set", config.api_key_env)))?;
        Self::new(&config.base_url, &config.model, api_key, config.timeout_secs)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one request and return the text of the first candidate.
    fn generate(&self, parts: Vec<Part<'_>>, schema: Value) -> AiResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout_secs)
                } else {
                    AiError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| AiError::MalformedResponse("Response has no text candidate".into()))?;

        debug!(model = %self.model, chars = text.len(), "gemini response received");
        Ok(text)
    }

    fn image_parts<'a>(image: &[u8], instruction: &'a str) -> Vec<Part<'a>> {
        vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: IMAGE_MIME_TYPE,
                    data: STANDARD.encode(image),
                },
            },
            Part::Text { text: instruction.into() },
        ]
    }
}

impl QueryInterpreter for GeminiClient {
    fn interpret(&self, query: &str) -> AiResult<InterpretedQuery> {
        let prompt = make_interpretation_prompt(query);
        let text = self.generate(vec![Part::Text { text: prompt.into() }], interpretation_schema())?;
        parse_interpretation(&text)
    }
}

impl AlternativesSource for GeminiClient {
    fn alternatives(&self, term: &str) -> AiResult<Vec<String>> {
        let prompt = make_alternatives_prompt(term);
        let text = self.generate(vec![Part::Text { text: prompt.into() }], string_list_schema())?;
        parse_name_list(&text)
    }
}

impl PrescriptionReader for GeminiClient {
    fn read_prescription(&self, image: &[u8]) -> AiResult<Vec<String>> {
        let text = self.generate(Self::image_parts(image, PRESCRIPTION_PROMPT), string_list_schema())?;
        parse_name_list(&text)
    }
}

impl PackagingIdentifier for GeminiClient {
    fn identify(&self, image: &[u8]) -> AiResult<PackagingIdentification> {
        let text = self.generate(Self::image_parts(image, PACKAGING_PROMPT), identification_schema())?;
        parse_identification(&text)
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: std::borrow::Cow<'a, str>,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

/// Response body from `generateContent`
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: GeminiClient::image_parts(b"abc", PACKAGING_PROMPT),
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: identification_schema(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], PACKAGING_PROMPT);
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_response_shape() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"[\"Efferalgan\"]"}],"role":"model"}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        let text = parsed.candidates[0].content.parts[0].text.as_deref().unwrap();
        assert_eq!(parse_name_list(text).unwrap(), vec!["Efferalgan"]);
    }

    #[test]
    fn test_missing_key_not_configured() {
        let config = AiConfig {
            api_key_env: "MEDIGO_GEMINI_TEST_UNSET".into(),
            ..AiConfig::default()
        };
        assert!(matches!(GeminiClient::from_config(&config), Err(AiError::NotConfigured(_))));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let client = GeminiClient::new("http://127.0.0.1:9", "test-model", "key".into(), 1).unwrap();
        let err = client.interpret("Coartem").unwrap_err();
        assert!(matches!(err, AiError::Transport(_) | AiError::Timeout(_)));
    }
}
