//! MediGo Core Library
//!
//! Medication availability search across a pharmacy network, with packaging
//! verification and dashboard summaries.
//!
//! # Architecture
//!
//! ```text
//! Query ──► Interpretation ──► Catalog Match ──► Dosage Refinement
//!   (free text)  (AI, optional)       │                  │
//!                                     │ no match         ▼
//!                                     ▼            Pharmacy Ranking
//!                               Alternatives   (in stock first, nearest)
//!
//! Packaging photo ──► Identification ──► Verification (closed-world)
//! ```
//!
//! # Core Principle
//!
//! **Collaborators are best-effort.** Every AI call has a fallback; a search always
//! produces an outcome from the local catalog.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicationRecord, PharmacyRecord, MatchOutcome, etc.)
//! - [`catalog`]: In-memory catalog store and seeded network generator
//! - [`search`]: Search/match engine (matcher, ranking, alternatives)
//! - [`verify`]: Packaging verification
//! - [`geo`]: Great-circle distance
//! - [`navigation`]: Screen navigation reducer
//! - [`dashboard`]: Partner and admin summaries
//! - [`ai`]: Collaborator traits for the generative-AI services
//! - [`config`]: TOML configuration

pub mod ai;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod geo;
pub mod models;
pub mod navigation;
pub mod search;
pub mod verify;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogStore, SeededGenerator};
pub use config::MediGoConfig;
pub use models::{
    Coordinates, Distance, MatchOutcome, MedicationRecord, PharmacyRecord, PharmacyStockEntry,
    SearchResult, StockStatus, VerificationReport, VerificationVerdict,
};
pub use navigation::{reduce, NavEvent, NavState, ViewState};
pub use search::{CatalogAlternatives, PrescriptionSearch, SearchEngine, SearchError};
pub use verify::VerificationEngine;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::Utc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MediGoError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<CatalogError> for MediGoError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownPharmacy(id) => MediGoError::NotFound(id),
            other => MediGoError::CatalogError(other.to_string()),
        }
    }
}

impl From<SearchError> for MediGoError {
    fn from(e: SearchError) -> Self {
        MediGoError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for MediGoError {
    fn from(e: serde_json::Error) -> Self {
        MediGoError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Generate a catalog and pharmacy network. `seed = None` draws from OS entropy.
#[uniffi::export]
pub fn open_catalog(seed: Option<u64>, pharmacy_count: u32) -> Result<Arc<MediGoCore>, MediGoError> {
    let mut generator = SeededGenerator::new(seed);
    let store = CatalogStore::generate(&mut generator, pharmacy_count as usize)?;
    Ok(Arc::new(MediGoCore::from_store(Arc::new(store))))
}

/// Great-circle distance in km, rounded to one decimal.
#[uniffi::export]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    geo::distance_km(lat1, lon1, lat2, lon2)
}

/// Apply a navigation event to a navigation state, both JSON-encoded.
#[uniffi::export]
pub fn reduce_navigation(state_json: String, event_json: String) -> Result<String, MediGoError> {
    let state: NavState = serde_json::from_str(&state_json)?;
    let event: NavEvent = serde_json::from_str(&event_json)?;
    Ok(serde_json::to_string(&reduce(state, event))?)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Catalog plus the engines that read it. Immutable, so shareable across threads.
#[derive(uniffi::Object)]
pub struct MediGoCore {
    catalog: Arc<CatalogStore>,
    search: SearchEngine,
    verification: VerificationEngine,
}

impl MediGoCore {
    /// Offline engines over `catalog`: literal matching with catalog-based alternatives.
    pub fn from_store(catalog: Arc<CatalogStore>) -> Self {
        let alternatives = Arc::new(CatalogAlternatives::new(catalog.clone()));
        Self {
            search: SearchEngine::new(catalog.clone()).with_alternatives(alternatives),
            verification: VerificationEngine::new(catalog.clone()),
            catalog,
        }
    }
}

#[uniffi::export]
impl MediGoCore {
    // =========================================================================
    // Search
    // =========================================================================

    /// Search for a medication, optionally narrowed by dosage and ranked from a location.
    pub fn search(
        &self,
        query: String,
        dosage: Option<String>,
        location: Option<FfiCoordinates>,
    ) -> Result<FfiMatchOutcome, MediGoError> {
        let origin = location.map(Coordinates::from);
        let outcome = self.search.search(&query, dosage.as_deref(), origin.as_ref())?;
        Ok(outcome.into())
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verdict for a brand name read from packaging.
    pub fn verify_name(&self, detected_name: String) -> FfiVerdict {
        self.verification.verify(&detected_name).into()
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    /// Medications whose name or generic name contains `text`, optionally in one category.
    pub fn browse(&self, text: String, category: Option<String>) -> Vec<FfiMedication> {
        self.catalog
            .browse(&text, category.as_deref())
            .into_iter()
            .map(|m| m.clone().into())
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories().into_iter().map(str::to_string).collect()
    }

    pub fn get_medication(&self, id: String) -> Option<FfiMedication> {
        self.catalog.medication(&id).map(|m| m.clone().into())
    }

    // =========================================================================
    // Dashboards
    // =========================================================================

    /// Partner dashboard as JSON.
    pub fn pharmacy_dashboard_json(&self, pharmacy_id: String, search_term: String) -> Result<String, MediGoError> {
        let dash = dashboard::PharmacyDashboard::build(&self.catalog, &pharmacy_id, &search_term)?;
        Ok(serde_json::to_string(&dash)?)
    }

    /// Admin dashboard as JSON.
    pub fn admin_dashboard_json(&self) -> Result<String, MediGoError> {
        Ok(serde_json::to_string(&dashboard::AdminDashboard::build(&self.catalog))?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe coordinates.
#[derive(Debug, Clone, Copy, uniffi::Record)]
pub struct FfiCoordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<FfiCoordinates> for Coordinates {
    fn from(c: FfiCoordinates) -> Self {
        Coordinates::new(c.lat, c.lng)
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub dosage: String,
    pub category: String,
    pub price: u32,
    pub currency: String,
    pub requires_prescription: bool,
    pub description: String,
    pub treats: Vec<String>,
    pub side_effects: Vec<String>,
    pub usage: String,
    pub warnings: Vec<String>,
    pub interactions: Vec<String>,
    pub storage: String,
    pub manufacturer: String,
}

impl From<MedicationRecord> for FfiMedication {
    fn from(m: MedicationRecord) -> Self {
        Self {
            id: m.id,
            name: m.name,
            generic_name: m.generic_name,
            dosage: m.dosage,
            category: m.category,
            price: m.price.amount,
            currency: m.price.currency,
            requires_prescription: m.requires_prescription,
            description: m.description,
            treats: m.treats,
            side_effects: m.side_effects,
            usage: m.usage,
            warnings: m.warnings,
            interactions: m.interactions,
            storage: m.storage,
            manufacturer: m.manufacturer,
        }
    }
}

/// FFI-safe ranked pharmacy result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchResult {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub verified: bool,
    pub open: bool,
    pub status: String,
    pub quantity: u32,
    pub price: u32,
    pub distance_km: f64,
    /// False when the distance is a placeholder estimate
    pub distance_measured: bool,
    pub updated: String,
}

impl From<SearchResult> for FfiSearchResult {
    fn from(r: SearchResult) -> Self {
        Self {
            updated: r.stock.freshness_label(Utc::now()),
            price: r.stock.price.unwrap_or(r.medication.price.amount),
            status: r.stock.status.as_str().to_string(),
            quantity: r.stock.quantity,
            distance_km: r.distance.km(),
            distance_measured: r.distance.is_measured(),
            pharmacy_id: r.pharmacy.id,
            pharmacy_name: r.pharmacy.name,
            city: r.pharmacy.city,
            address: r.pharmacy.address,
            phone: r.pharmacy.phone,
            verified: r.pharmacy.verified,
            open: r.pharmacy.open,
        }
    }
}

/// FFI-safe search outcome.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiMatchOutcome {
    Matched {
        medication: FfiMedication,
        results: Vec<FfiSearchResult>,
    },
    NoMatch {
        target_term: String,
        alternatives: Vec<String>,
    },
}

impl From<MatchOutcome> for FfiMatchOutcome {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Matched { medication, results } => FfiMatchOutcome::Matched {
                medication: medication.into(),
                results: results.into_iter().map(|r| r.into()).collect(),
            },
            MatchOutcome::NoMatch {
                target_term,
                alternatives,
            } => FfiMatchOutcome::NoMatch {
                target_term,
                alternatives,
            },
        }
    }
}

/// FFI-safe verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiVerdict {
    Authentic,
    Suspect,
}

impl From<VerificationVerdict> for FfiVerdict {
    fn from(v: VerificationVerdict) -> Self {
        match v {
            VerificationVerdict::Authentic => FfiVerdict::Authentic,
            VerificationVerdict::Suspect => FfiVerdict::Suspect,
        }
    }
}
