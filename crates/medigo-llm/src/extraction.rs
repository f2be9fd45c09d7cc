//! Parsing of model output into collaborator results.
//!
//! Models sometimes wrap JSON in prose or markdown fences, so the payload is located
//! before deserializing. Every failure maps to `AiError::MalformedResponse`.

use medigo_core::ai::{
    AiError, AiResult, ConfidenceLabel, InterpretedQuery, PackagingIdentification, UNREADABLE_SENTINEL,
};
use serde::Deserialize;

/// Locate the JSON value in a model response.
///
/// Takes the span from the first `open` to the last `close` delimiter.
fn json_slice(text: &str, open: char, close: char) -> AiResult<&str> {
    let start = text
        .find(open)
        .ok_or_else(|| AiError::MalformedResponse(format!("No '{}' found in response", open)))?;
    let end = text
        .rfind(close)
        .filter(|end| *end > start)
        .ok_or_else(|| AiError::MalformedResponse(format!("No closing '{}' found in response", close)))?;
    Ok(&text[start..=end])
}

fn malformed(e: serde_json::Error) -> AiError {
    AiError::MalformedResponse(e.to_string())
}

/// Parse a query interpretation. An empty medication name is malformed.
pub fn parse_interpretation(text: &str) -> AiResult<InterpretedQuery> {
    let slice = json_slice(text, '{', '}')?;
    let mut parsed: InterpretedQuery = serde_json::from_str(slice).map_err(malformed)?;

    parsed.medication_name = parsed.medication_name.trim().to_string();
    if parsed.medication_name.is_empty() {
        return Err(AiError::MalformedResponse("Empty medicationName".into()));
    }
    parsed.category = parsed.category.filter(|c| !c.trim().is_empty());
    Ok(parsed)
}

/// Parse a JSON array of names, dropping blanks.
pub fn parse_name_list(text: &str) -> AiResult<Vec<String>> {
    let slice = json_slice(text, '[', ']')?;
    let names: Vec<String> = serde_json::from_str(slice).map_err(malformed)?;
    Ok(names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect())
}

/// Raw identification; the model may return any confidence string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIdentification {
    #[serde(default)]
    detected_name: String,
    #[serde(default)]
    confidence: String,
}

/// Parse a packaging identification.
///
/// Blank names become the unreadable sentinel; unrecognised confidence is LOW.
pub fn parse_identification(text: &str) -> AiResult<PackagingIdentification> {
    let slice = json_slice(text, '{', '}')?;
    let raw: RawIdentification = serde_json::from_str(slice).map_err(malformed)?;

    let detected_name = match raw.detected_name.trim() {
        "" => UNREADABLE_SENTINEL.to_string(),
        name => name.to_string(),
    };
    let confidence = if raw.confidence.trim().eq_ignore_ascii_case("high") {
        ConfidenceLabel::High
    } else {
        ConfidenceLabel::Low
    };

    Ok(PackagingIdentification {
        detected_name,
        confidence,
    })
}
