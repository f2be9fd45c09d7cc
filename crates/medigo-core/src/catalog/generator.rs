//! Seedable mock-data generator for the catalogue batch and the pharmacy network.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::seed::{
    City, CITIES, EXTRA_DRUGS, MANUFACTURERS, PHARMACY_PREFIXES, PHARMACY_SUFFIXES,
    PRESCRIPTION_CATEGORIES,
};
use crate::models::{
    Coordinates, MedicationRecord, PharmacyRecord, PharmacyStockEntry, Price, StockStatus,
};

/// Number of passes over the extra-drug table.
const EXTENSION_PASSES: usize = 4;

/// Width of the placement window around a city centre, in degrees, on each axis.
const LOCATION_JITTER_DEG: f64 = 0.1;

/// Stocked medications per pharmacy: MIN..MIN+SPAN.
const STOCK_SUBSET_MIN: usize = 20;
const STOCK_SUBSET_SPAN: usize = 30;

/// Produces the generated parts of the catalog.
///
/// Tests can skip this entirely and hand fixed records to `CatalogStore::new`.
pub trait CatalogGenerator {
    /// Medications appended after the curated seed list.
    fn extension_medications(&mut self) -> Vec<MedicationRecord>;

    /// Pharmacies stocking a subset of `medications`.
    fn pharmacies(&mut self, medications: &[MedicationRecord], count: usize) -> Vec<PharmacyRecord>;
}

/// ChaCha-backed generator. Same seed and clock give the same catalog.
pub struct SeededGenerator {
    rng: ChaCha8Rng,
    now: DateTime<Utc>,
}

impl SeededGenerator {
    /// Create a generator; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng, now: Utc::now() }
    }

    /// Pin the reference time used for stock freshness.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn pick<'a>(&mut self, items: &'a [&'static str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn pick_city(&mut self) -> &'static City {
        // CITIES is a non-empty const table
        &CITIES[self.rng.gen_range(0..CITIES.len())]
    }

    fn pharmacy_name(&mut self, neighborhood: &str) -> String {
        let prefix = self.pick(PHARMACY_PREFIXES).to_string();
        let suffix = if self.rng.gen_bool(0.5) {
            self.pick(PHARMACY_SUFFIXES).to_string()
        } else {
            String::new()
        };

        if self.rng.gen::<f64>() > 0.6 || suffix.is_empty() {
            format!("{} {}", prefix, neighborhood)
        } else {
            format!("{} {} {}", prefix, suffix, neighborhood)
        }
    }

    fn stock_entry(&mut self, medication: &MedicationRecord) -> PharmacyStockEntry {
        let roll = self.rng.gen::<f64>();
        let status = if roll > 0.8 {
            StockStatus::OutOfStock
        } else if roll > 0.6 {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        };
        let quantity = self.rng.gen_range(10..210);
        let updated_at = self.now - Duration::minutes(self.rng.gen_range(1..60));
        let price = medication.price.amount + self.rng.gen_range(0..10) * 50;

        PharmacyStockEntry::new(medication.id.clone(), status, quantity, updated_at).with_price(price)
    }
}

impl CatalogGenerator for SeededGenerator {
    fn extension_medications(&mut self) -> Vec<MedicationRecord> {
        let mut medications = Vec::with_capacity(EXTENSION_PASSES * EXTRA_DRUGS.len());

        for pass in 0..EXTENSION_PASSES {
            for (idx, (name, generic, dosage, category)) in EXTRA_DRUGS.iter().enumerate() {
                let mut med = MedicationRecord::new(
                    format!("gen_{}_{}", pass, idx),
                    name.to_string(),
                    generic.to_string(),
                    dosage.to_string(),
                    category.to_string(),
                );
                med.price = Price::xaf(self.rng.gen_range(500..5500));
                med.requires_prescription = PRESCRIPTION_CATEGORIES.contains(category);
                med.description = format!(
                    "Standard {} formulation used for {} treatments. Consult your doctor for specific usage.",
                    generic,
                    category.to_lowercase()
                );
                med.treats = vec!["General Symptoms".into(), "Pain".into(), "Infection".into()];
                med.side_effects = vec!["Nausea".into(), "Dizziness".into()];
                med.usage = "As prescribed by physician.".into();
                med.warnings = vec![
                    "Consult doctor before use.".into(),
                    "Keep out of reach of children.".into(),
                ];
                med.interactions = vec!["Alcohol".into()];
                med.storage = "Store in a cool dry place.".into();
                med.manufacturer = self.pick(MANUFACTURERS).to_string();
                medications.push(med);
            }
        }

        medications
    }

    fn pharmacies(&mut self, medications: &[MedicationRecord], count: usize) -> Vec<PharmacyRecord> {
        let mut pharmacies = Vec::with_capacity(count);

        for i in 0..count {
            let city = self.pick_city();
            let neighborhood = self.pick(city.neighborhoods).to_string();
            let lat_offset = (self.rng.gen::<f64>() - 0.5) * LOCATION_JITTER_DEG;
            let lng_offset = (self.rng.gen::<f64>() - 0.5) * LOCATION_JITTER_DEG;
            let name = self.pharmacy_name(&neighborhood);

            // Shuffling indices keeps one entry per medication.
            let mut indices: Vec<usize> = (0..medications.len()).collect();
            indices.shuffle(&mut self.rng);
            let subset = (STOCK_SUBSET_MIN + self.rng.gen_range(0..STOCK_SUBSET_SPAN)).min(indices.len());
            let stock = indices[..subset]
                .iter()
                .map(|&idx| self.stock_entry(&medications[idx]))
                .collect();

            let mut pharmacy = PharmacyRecord::new(
                format!("p{}", i),
                name,
                city.name.to_string(),
                Coordinates::new(city.lat + lat_offset, city.lng + lng_offset),
            );
            pharmacy.address = format!("{}, {}", neighborhood, city.name);
            pharmacy.verified = self.rng.gen::<f64>() > 0.1;
            pharmacy.open = self.rng.gen::<f64>() > 0.2;
            pharmacy.phone = format!("+237 6{}", self.rng.gen_range(10_000_000..100_000_000));
            pharmacy.stock = stock;
            pharmacies.push(pharmacy);
        }

        pharmacies
    }
}
