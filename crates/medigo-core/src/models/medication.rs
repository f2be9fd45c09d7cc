//! Medication catalog models.

use serde::{Deserialize, Serialize};

/// Price with its currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    /// Non-negative amount in the smallest commonly quoted unit (XAF has no minor unit)
    pub amount: u32,
    /// ISO 4217 currency code (e.g., "XAF")
    pub currency: String,
}

impl Price {
    pub fn xaf(amount: u32) -> Self {
        Self {
            amount,
            currency: "XAF".into(),
        }
    }
}

/// A single medication in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    /// Unique identifier (e.g., "m2", "gen_0_4")
    pub id: String,
    /// Brand/display name
    pub name: String,
    /// Generic (active ingredient) name
    pub generic_name: String,
    /// Dosage strength (e.g., "500mg", "100IU/ml")
    pub dosage: String,
    /// Therapeutic category (e.g., "Antibiotic")
    pub category: String,
    pub price: Price,
    /// Whether a prescription is required to dispense
    pub requires_prescription: bool,
    pub description: String,
    /// Symptoms/conditions treated
    pub treats: Vec<String>,
    pub side_effects: Vec<String>,
    /// Usage instructions
    pub usage: String,
    pub warnings: Vec<String>,
    pub interactions: Vec<String>,
    /// Storage instructions
    pub storage: String,
    pub manufacturer: String,
}

impl MedicationRecord {
    /// Create a medication with required fields; descriptive fields start empty.
    pub fn new(id: String, name: String, generic_name: String, dosage: String, category: String) -> Self {
        Self {
            id,
            name,
            generic_name,
            dosage,
            category,
            price: Price::xaf(0),
            requires_prescription: false,
            description: String::new(),
            treats: Vec::new(),
            side_effects: Vec::new(),
            usage: String::new(),
            warnings: Vec::new(),
            interactions: Vec::new(),
            storage: String::new(),
            manufacturer: String::new(),
        }
    }

    /// Case-insensitive substring check against name or category.
    ///
    /// `term_lower` must already be lowercased.
    pub fn name_or_category_contains(&self, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.category.to_lowercase().contains(term_lower)
    }

    /// Case-insensitive substring check against name or generic name.
    ///
    /// `term_lower` must already be lowercased.
    pub fn name_or_generic_contains(&self, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.generic_name.to_lowercase().contains(term_lower)
    }

    /// Case-insensitive substring check against the dosage string.
    pub fn dosage_contains(&self, dosage_lower: &str) -> bool {
        self.dosage.to_lowercase().contains(dosage_lower)
    }

    /// Display label combining name and dosage ("Amoxil 500mg").
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.dosage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amoxil() -> MedicationRecord {
        MedicationRecord::new(
            "m2".into(),
            "Amoxil".into(),
            "Amoxicillin".into(),
            "500mg".into(),
            "Antibiotic".into(),
        )
    }

    #[test]
    fn test_name_or_category_match() {
        let med = amoxil();
        assert!(med.name_or_category_contains("amox"));
        assert!(med.name_or_category_contains("antibio"));
        assert!(!med.name_or_category_contains("amoxicillin"));
    }

    #[test]
    fn test_name_or_generic_match() {
        let med = amoxil();
        assert!(med.name_or_generic_contains("amoxicillin"));
        assert!(!med.name_or_generic_contains("antibiotic"));
    }

    #[test]
    fn test_dosage_match() {
        let med = amoxil();
        assert!(med.dosage_contains("500"));
        assert!(med.dosage_contains("500mg"));
        assert!(!med.dosage_contains("250mg"));
    }

    #[test]
    fn test_label() {
        assert_eq!(amoxil().label(), "Amoxil 500mg");
    }
}
