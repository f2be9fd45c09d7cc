//! Generative-AI collaborators for MediGo.
//!
//! This crate turns model output into the collaborator traits defined in
//! `medigo_core::ai`: query interpretation, alternative suggestions, prescription
//! reading and packaging identification. The Gemini HTTP client sits behind the
//! `gemini` feature; offline implementations are always available.

pub mod extraction;
pub mod offline;
pub mod prompts;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use extraction::*;
pub use offline::KeywordInterpreter;
pub use prompts::*;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

use std::sync::Arc;

use medigo_core::ai::{AlternativesSource, PackagingIdentifier, PrescriptionReader, QueryInterpreter};
use medigo_core::config::AiConfig;
use medigo_core::{CatalogAlternatives, CatalogStore, SearchEngine, VerificationEngine};
use tracing::warn;

/// The set of collaborators handed to the engines.
#[derive(Clone)]
pub struct Collaborators {
    pub interpreter: Arc<dyn QueryInterpreter>,
    pub alternatives: Arc<dyn AlternativesSource>,
    /// `None` when no vision model is available
    pub prescriptions: Option<Arc<dyn PrescriptionReader>>,
    pub packaging: Option<Arc<dyn PackagingIdentifier>>,
}

impl Collaborators {
    /// Keyword interpretation and catalog-based suggestions; no image reading.
    pub fn offline(catalog: Arc<CatalogStore>) -> Self {
        let interpreter =
            KeywordInterpreter::with_catalog_names(catalog.medications().iter().map(|m| m.name.as_str()));
        Self {
            interpreter: Arc::new(interpreter),
            alternatives: Arc::new(CatalogAlternatives::new(catalog)),
            prescriptions: None,
            packaging: None,
        }
    }

    /// Remote collaborators when enabled and configured, offline ones otherwise.
    pub fn from_config(config: &AiConfig, catalog: Arc<CatalogStore>) -> Self {
        if !config.enabled {
            return Self::offline(catalog);
        }
        Self::remote(config, catalog)
    }

    #[cfg(feature = "gemini")]
    fn remote(config: &AiConfig, catalog: Arc<CatalogStore>) -> Self {
        match GeminiClient::from_config(config) {
            Ok(client) => {
                tracing::info!(model = client.model(), "using gemini collaborators");
                let client = Arc::new(client);
                Self {
                    interpreter: client.clone(),
                    alternatives: client.clone(),
                    prescriptions: Some(client.clone()),
                    packaging: Some(client),
                }
            }
            Err(e) => {
                warn!(error = %e, "gemini unavailable; using offline collaborators");
                Self::offline(catalog)
            }
        }
    }

    #[cfg(not(feature = "gemini"))]
    fn remote(_config: &AiConfig, catalog: Arc<CatalogStore>) -> Self {
        warn!("AI enabled but built without the gemini feature; using offline collaborators");
        Self::offline(catalog)
    }

    /// Search engine wired to these collaborators.
    pub fn search_engine(&self, catalog: Arc<CatalogStore>) -> SearchEngine {
        let engine = SearchEngine::new(catalog)
            .with_interpreter(self.interpreter.clone())
            .with_alternatives(self.alternatives.clone());
        match &self.prescriptions {
            Some(reader) => engine.with_prescription_reader(reader.clone()),
            None => engine,
        }
    }

    /// Verification engine wired to the packaging identifier, if any.
    pub fn verification_engine(&self, catalog: Arc<CatalogStore>) -> VerificationEngine {
        let engine = VerificationEngine::new(catalog);
        match &self.packaging {
            Some(identifier) => engine.with_identifier(identifier.clone()),
            None => engine,
        }
    }
}
