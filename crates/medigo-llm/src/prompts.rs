//! Prompts and response schemas for the Gemini collaborators.
//!
//! Each task pairs an instruction with a JSON schema passed as
//! `generationConfig.responseSchema`, so the model answers in a fixed shape.

use serde_json::{json, Value};

/// Number of alternatives requested when nothing matched.
pub const ALTERNATIVES_COUNT: usize = 3;

/// Mime type sent with every inline image.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Instruction for free-text query interpretation.
pub fn make_interpretation_prompt(query: &str) -> String {
    format!(
        r#"Analyze this search query related to medicine in Cameroon: "{}".
Return a JSON object with:
- medicationName: The likely generic or brand name of the drug.
- category: Broad category (e.g., Antimalarial, Antibiotic).
- urgencyLevel: HIGH if it sounds like an emergency (e.g., severe pain, bleeding, malaria attack), otherwise MEDIUM or LOW.
- isSymptomDescription: true if the user described symptoms instead of a drug name."#,
        query
    )
}

/// Instruction for alternative suggestions.
pub fn make_alternatives_prompt(medication_name: &str) -> String {
    format!(
        r#"List {} safe, generic alternative medicines available in Central Africa for "{}". Return ONLY a JSON array of strings."#,
        ALTERNATIVES_COUNT, medication_name
    )
}

/// Instruction sent with a prescription photo.
pub const PRESCRIPTION_PROMPT: &str = "Read this prescription. List the names of the medications prescribed as a JSON array of strings. If unclear, return an empty array.";

/// Instruction sent with a packaging photo.
pub const PACKAGING_PROMPT: &str = "Look at this image of a medicine box or barcode. Identify the BRAND NAME of the medication. Return a JSON with 'detectedName' (string) and 'confidence' (string: 'HIGH' or 'LOW'). If no text is clear, return 'Unknown'.";

pub fn interpretation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "medicationName": { "type": "STRING" },
            "category": { "type": "STRING" },
            "urgencyLevel": { "type": "STRING", "enum": ["HIGH", "MEDIUM", "LOW"] },
            "isSymptomDescription": { "type": "BOOLEAN" }
        }
    })
}

/// Schema for alternatives and prescription names.
pub fn string_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

pub fn identification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "detectedName": { "type": "STRING" },
            "confidence": { "type": "STRING" }
        }
    })
}
