//! Search and verification outcome models.

use serde::{Deserialize, Serialize};

use super::{MedicationRecord, PharmacyRecord, PharmacyStockEntry};

/// Distance from the caller to a pharmacy.
///
/// `Estimated` is a placeholder used when the caller location is unknown. It only
/// gives the ranking a well-defined order and is not a measurement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "km", rename_all = "snake_case")]
pub enum Distance {
    Measured(f64),
    Estimated(f64),
}

impl Distance {
    pub fn km(&self) -> f64 {
        match self {
            Distance::Measured(km) | Distance::Estimated(km) => *km,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Distance::Measured(_))
    }
}

/// One pharmacy carrying the matched medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub pharmacy: PharmacyRecord,
    pub medication: MedicationRecord,
    /// The pharmacy's stock entry for `medication`
    pub stock: PharmacyStockEntry,
    pub distance: Distance,
}

/// Result of a search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOutcome {
    /// A medication matched; results are ranked and may be empty
    Matched {
        medication: MedicationRecord,
        results: Vec<SearchResult>,
    },
    /// Nothing matched; alternatives may be empty
    NoMatch {
        target_term: String,
        alternatives: Vec<String>,
    },
}

impl MatchOutcome {
    pub fn medication(&self) -> Option<&MedicationRecord> {
        match self {
            MatchOutcome::Matched { medication, .. } => Some(medication),
            MatchOutcome::NoMatch { .. } => None,
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        match self {
            MatchOutcome::Matched { results, .. } => results,
            MatchOutcome::NoMatch { .. } => &[],
        }
    }

    pub fn alternatives(&self) -> &[String] {
        match self {
            MatchOutcome::Matched { .. } => &[],
            MatchOutcome::NoMatch { alternatives, .. } => alternatives,
        }
    }
}

/// Authenticity verdict for scanned packaging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationVerdict {
    Authentic,
    Suspect,
}

/// Full verification result returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationReport {
    /// Name read from the packaging (or the unreadable sentinel)
    pub detected_name: String,
    /// Confidence label reported by the classifier
    pub confidence: String,
    pub verdict: VerificationVerdict,
    /// First catalog medication that matched, if any
    pub matched_medication_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_km() {
        assert_eq!(Distance::Measured(3.2).km(), 3.2);
        assert_eq!(Distance::Estimated(7.0).km(), 7.0);
        assert!(Distance::Measured(1.0).is_measured());
        assert!(!Distance::Estimated(1.0).is_measured());
    }

    #[test]
    fn test_distance_serialization_tags_estimates() {
        let json = serde_json::to_string(&Distance::Estimated(4.0)).unwrap();
        assert_eq!(json, r#"{"kind":"estimated","km":4.0}"#);
    }

    #[test]
    fn test_no_match_accessors() {
        let outcome = MatchOutcome::NoMatch {
            target_term: "xyz".into(),
            alternatives: vec!["Doliprane".into()],
        };
        assert!(outcome.medication().is_none());
        assert!(outcome.results().is_empty());
        assert_eq!(outcome.alternatives(), ["Doliprane".to_string()]);
    }
}
