//! Collaborator interfaces for generative-AI services.
//!
//! The engines only see these traits. Implementations live in `medigo-llm`
//! (remote model, offline keyword tables) or in tests. Every call is
//! best-effort: callers degrade to a documented fallback on any `AiError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detected name returned when packaging text could not be read.
pub const UNREADABLE_SENTINEL: &str = "Unknown";

/// Collaborator errors.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI service not configured: {0}")]
    NotConfigured(String),

    #[error("AI request timed out after {0}s")]
    Timeout(u64),

    #[error("AI transport error: {0}")]
    Transport(String),

    #[error("AI service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// How urgent a query sounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

/// Structured interpretation of a free-text query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterpretedQuery {
    /// Likely generic or brand name of the drug
    pub medication_name: String,
    /// Broad category (e.g., "Antimalarial")
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_urgency")]
    pub urgency_level: UrgencyLevel,
    /// True when the user described symptoms instead of naming a drug
    #[serde(default)]
    pub is_symptom_description: bool,
}

fn default_urgency() -> UrgencyLevel {
    UrgencyLevel::Low
}

/// Classifier confidence for a packaging read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLabel {
    High,
    Low,
}

impl ConfidenceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLabel::High => "HIGH",
            ConfidenceLabel::Low => "LOW",
        }
    }
}

/// Name read from a medicine box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackagingIdentification {
    pub detected_name: String,
    pub confidence: ConfidenceLabel,
}

impl PackagingIdentification {
    /// The fallback used whenever the classifier cannot be reached or read nothing.
    pub fn unreadable() -> Self {
        Self {
            detected_name: UNREADABLE_SENTINEL.to_string(),
            confidence: ConfidenceLabel::Low,
        }
    }
}

/// Maps a raw query to a canonical medication name.
pub trait QueryInterpreter: Send + Sync {
    fn interpret(&self, query: &str) -> AiResult<InterpretedQuery>;
}

/// Suggests alternative medication names when nothing matched.
pub trait AlternativesSource: Send + Sync {
    fn alternatives(&self, term: &str) -> AiResult<Vec<String>>;
}

/// Extracts medication names from a prescription photo.
pub trait PrescriptionReader: Send + Sync {
    fn read_prescription(&self, image: &[u8]) -> AiResult<Vec<String>>;
}

/// Identifies the brand name printed on packaging.
pub trait PackagingIdentifier: Send + Sync {
    fn identify(&self, image: &[u8]) -> AiResult<PackagingIdentification>;
}
