//! Offline query interpretation from keyword tables.
//!
//! Used when no model is configured. Maps common symptoms and generic names to a
//! catalog brand, the way a pharmacist would answer at the counter.

use medigo_core::ai::{AiResult, InterpretedQuery, QueryInterpreter, UrgencyLevel};

/// (keyword, brand, category)
const SYMPTOMS: &[(&str, &str, &str)] = &[
    ("malaria", "Coartem", "Antimalarial"),
    ("paludisme", "Coartem", "Antimalarial"),
    ("chills", "Coartem", "Antimalarial"),
    ("fever", "Doliprane", "Analgesic"),
    ("fièvre", "Doliprane", "Analgesic"),
    ("headache", "Doliprane", "Analgesic"),
    ("pain", "Advil", "Analgesic"),
    ("douleur", "Advil", "Analgesic"),
    ("asthma", "Ventolin", "Respiratory"),
    ("wheez", "Ventolin", "Respiratory"),
    ("breath", "Ventolin", "Respiratory"),
    ("infection", "Amoxil", "Antibiotic"),
    ("throat", "Amoxil", "Antibiotic"),
    ("heartburn", "Mopral", "Gastric"),
    ("ulcer", "Mopral", "Gastric"),
    ("reflux", "Mopral", "Gastric"),
    ("diabet", "Lantus", "Diabetes"),
    ("sugar", "Lantus", "Diabetes"),
];

/// (generic name, brand)
const GENERICS: &[(&str, &str)] = &[
    ("paracetamol", "Doliprane"),
    ("acetaminophen", "Doliprane"),
    ("ibuprofen", "Advil"),
    ("amoxicillin", "Amoxil"),
    ("azithromycin", "Zithromax"),
    ("artemether", "Coartem"),
    ("lumefantrine", "Coartem"),
    ("salbutamol", "Ventolin"),
    ("albuterol", "Ventolin"),
    ("omeprazole", "Mopral"),
    ("insulin", "Lantus"),
    ("tenofovir", "Viraday"),
];

const URGENT: &[&str] = &["severe", "bleeding", "emergency", "urgent", "attack", "can't breathe", "unconscious"];

/// Keyword-table interpreter. Queries with no known keyword pass through unchanged,
/// as do queries that already name a catalog medication.
#[derive(Debug, Default, Clone)]
pub struct KeywordInterpreter {
    /// Lowercased catalog medication names
    catalog_names: Vec<String>,
}

impl KeywordInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter that leaves queries naming a catalog medication untouched.
    pub fn with_catalog_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            catalog_names: names.into_iter().map(|n| n.as_ref().to_lowercase()).collect(),
        }
    }

    fn names_catalog_entry(&self, lower: &str) -> bool {
        self.catalog_names.iter().any(|n| !n.is_empty() && lower.contains(n.as_str()))
    }

    /// Interpretation for `query`; never fails.
    pub fn interpret_query(&self, query: &str) -> InterpretedQuery {
        let query = query.trim();
        let lower = query.to_lowercase();

        let urgency_level = if URGENT.iter().any(|k| lower.contains(k)) {
            UrgencyLevel::High
        } else {
            UrgencyLevel::Low
        };

        if self.names_catalog_entry(&lower) {
            return InterpretedQuery {
                medication_name: query.to_string(),
                category: None,
                urgency_level,
                is_symptom_description: false,
            };
        }

        if let Some((_, brand)) = GENERICS.iter().find(|(generic, _)| lower.contains(generic)) {
            return InterpretedQuery {
                medication_name: brand.to_string(),
                category: None,
                urgency_level,
                is_symptom_description: false,
            };
        }

        if let Some((_, brand, category)) = SYMPTOMS.iter().find(|(keyword, _, _)| lower.contains(keyword)) {
            return InterpretedQuery {
                medication_name: brand.to_string(),
                category: Some(category.to_string()),
                urgency_level,
                is_symptom_description: true,
            };
        }

        InterpretedQuery {
            medication_name: query.to_string(),
            category: None,
            urgency_level,
            is_symptom_description: false,
        }
    }
}

impl QueryInterpreter for KeywordInterpreter {
    fn interpret(&self, query: &str) -> AiResult<InterpretedQuery> {
        Ok(self.interpret_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_maps_to_brand() {
        let parsed = KeywordInterpreter::new().interpret_query("high fever since yesterday");
        assert_eq!(parsed.medication_name, "Doliprane");
        assert_eq!(parsed.category.as_deref(), Some("Analgesic"));
        assert!(parsed.is_symptom_description);
    }

    #[test]
    fn test_generic_wins_over_symptom() {
        let parsed = KeywordInterpreter::new().interpret_query("paracetamol for pain");
        assert_eq!(parsed.medication_name, "Doliprane");
        assert!(!parsed.is_symptom_description);
    }

    #[test]
    fn test_urgency() {
        let parsed = KeywordInterpreter::new().interpret_query("severe malaria attack");
        assert_eq!(parsed.medication_name, "Coartem");
        assert_eq!(parsed.urgency_level, UrgencyLevel::High);
    }

    #[test]
    fn test_catalog_name_not_rewritten() {
        let interpreter = KeywordInterpreter::with_catalog_names(["Ibuprofen", "Advil"]);
        let parsed = interpreter.interpret_query("Ibuprofen");
        assert_eq!(parsed.medication_name, "Ibuprofen");
        assert!(!parsed.is_symptom_description);

        // Generic names that are not catalog entries still map to a brand.
        let parsed = interpreter.interpret_query("paracetamol");
        assert_eq!(parsed.medication_name, "Doliprane");
    }

    #[test]
    fn test_unknown_passes_through() {
        let parsed = KeywordInterpreter::new().interpret_query("  Zithromax ");
        assert_eq!(parsed.medication_name, "Zithromax");
        assert_eq!(parsed.urgency_level, UrgencyLevel::Low);
        assert!(!parsed.is_symptom_description);
    }
}
