//! In-memory catalog of medications and the pharmacy network.
//!
//! Built once at startup and never mutated; share it behind an `Arc`.

mod generator;
pub mod seed;

pub use generator::*;

use std::collections::HashSet;

use thiserror::Error;
use tracing::info;

use crate::models::{MedicationRecord, Order, PharmacyRecord, Report};

/// Catalog construction errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate medication id: {0}")]
    DuplicateMedication(String),

    #[error("Duplicate pharmacy id: {0}")]
    DuplicatePharmacy(String),

    #[error("Pharmacy {pharmacy} lists medication {medication} more than once")]
    DuplicateStock { pharmacy: String, medication: String },

    #[error("Pharmacy {pharmacy} reports out-of-stock {medication} with non-zero quantity")]
    InconsistentStock { pharmacy: String, medication: String },

    #[error("Unknown pharmacy: {0}")]
    UnknownPharmacy(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only store of medications, pharmacies and dashboard records.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    medications: Vec<MedicationRecord>,
    pharmacies: Vec<PharmacyRecord>,
    orders: Vec<Order>,
    reports: Vec<Report>,
}

impl CatalogStore {
    /// Build a store from fixed records, validating id uniqueness and stock invariants.
    pub fn new(medications: Vec<MedicationRecord>, pharmacies: Vec<PharmacyRecord>) -> CatalogResult<Self> {
        let mut med_ids = HashSet::new();
        for med in &medications {
            if !med_ids.insert(med.id.as_str()) {
                return Err(CatalogError::DuplicateMedication(med.id.clone()));
            }
        }

        let mut pharmacy_ids = HashSet::new();
        for pharmacy in &pharmacies {
            if !pharmacy_ids.insert(pharmacy.id.as_str()) {
                return Err(CatalogError::DuplicatePharmacy(pharmacy.id.clone()));
            }
            let mut stocked = HashSet::new();
            for entry in &pharmacy.stock {
                if !stocked.insert(entry.medication_id.as_str()) {
                    return Err(CatalogError::DuplicateStock {
                        pharmacy: pharmacy.id.clone(),
                        medication: entry.medication_id.clone(),
                    });
                }
                if !entry.is_consistent() {
                    return Err(CatalogError::InconsistentStock {
                        pharmacy: pharmacy.id.clone(),
                        medication: entry.medication_id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            medications,
            pharmacies,
            orders: Vec::new(),
            reports: Vec::new(),
        })
    }

    /// Seed list + generated batch + generated pharmacy network + mock dashboard records.
    pub fn generate<G: CatalogGenerator>(generator: &mut G, pharmacy_count: usize) -> CatalogResult<Self> {
        let mut medications = seed::seed_medications();
        medications.extend(generator.extension_medications());
        let pharmacies = generator.pharmacies(&medications, pharmacy_count);

        let store = Self::new(medications, pharmacies)?
            .with_operations(seed::mock_orders(), seed::mock_reports());

        info!(
            medications = store.medications.len(),
            pharmacies = store.pharmacies.len(),
            "catalog generated"
        );
        Ok(store)
    }

    /// Attach dashboard records.
    pub fn with_operations(mut self, orders: Vec<Order>, reports: Vec<Report>) -> Self {
        self.orders = orders;
        self.reports = reports;
        self
    }

    /// All medications in insertion order.
    pub fn medications(&self) -> &[MedicationRecord] {
        &self.medications
    }

    pub fn pharmacies(&self) -> &[PharmacyRecord] {
        &self.pharmacies
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn medication(&self, id: &str) -> Option<&MedicationRecord> {
        self.medications.iter().find(|m| m.id == id)
    }

    pub fn pharmacy(&self, id: &str) -> Option<&PharmacyRecord> {
        self.pharmacies.iter().find(|p| p.id == id)
    }

    /// Unique categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.medications
            .iter()
            .map(|m| m.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Catalogue browsing: name or generic-name substring, optional exact category.
    pub fn browse(&self, text: &str, category: Option<&str>) -> Vec<&MedicationRecord> {
        let text_lower = text.trim().to_lowercase();
        self.medications
            .iter()
            .filter(|m| m.name_or_generic_contains(&text_lower))
            .filter(|m| category.map_or(true, |c| m.category == c))
            .collect()
    }
}
