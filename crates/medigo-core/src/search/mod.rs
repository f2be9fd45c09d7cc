//! Search/match engine.
//!
//! Pipeline: Query Interpretation → Catalog Match → Dosage Refinement → Pharmacy Ranking
//!
//! Collaborator failures never abort a search. A failed interpretation falls back to
//! literal matching; a failed alternatives lookup yields an empty suggestion list.

mod alternatives;
pub mod matcher;
pub mod ranking;

pub use alternatives::*;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::ai::{AlternativesSource, PrescriptionReader, QueryInterpreter};
use crate::catalog::CatalogStore;
use crate::models::{Coordinates, MatchOutcome};

/// Search errors.
#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("Search query is empty")]
    EmptyQuery,
}

pub type SearchOutcomeResult = Result<MatchOutcome, SearchError>;

/// Outcome of a prescription photo search.
#[derive(Debug, Clone, PartialEq)]
pub enum PrescriptionSearch {
    /// Names read from the prescription and the search run on the first one
    Searched {
        medication_names: Vec<String>,
        outcome: MatchOutcome,
    },
    /// Nothing legible on the prescription
    Unreadable,
}

/// Resolves free-text queries against the catalog and ranks stocking pharmacies.
pub struct SearchEngine {
    catalog: Arc<CatalogStore>,
    interpreter: Option<Arc<dyn QueryInterpreter>>,
    alternatives: Option<Arc<dyn AlternativesSource>>,
    prescriptions: Option<Arc<dyn PrescriptionReader>>,
}

impl SearchEngine {
    /// Engine with literal matching and no suggestion source.
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            interpreter: None,
            alternatives: None,
            prescriptions: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: Arc<dyn QueryInterpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn with_alternatives(mut self, alternatives: Arc<dyn AlternativesSource>) -> Self {
        self.alternatives = Some(alternatives);
        self
    }

    pub fn with_prescription_reader(mut self, reader: Arc<dyn PrescriptionReader>) -> Self {
        self.prescriptions = Some(reader);
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Search for `query`, optionally narrowed by `dosage`, ranking pharmacies
    /// by availability then distance from `location`.
    pub fn search(
        &self,
        query: &str,
        dosage: Option<&str>,
        location: Option<&Coordinates>,
    ) -> SearchOutcomeResult {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let request_id = Uuid::new_v4();
        let span = info_span!("search", %request_id, query);
        let _guard = span.enter();

        let target = self.target_term(query);
        let medications = self.catalog.medications();

        let Some(medication) = matcher::resolve(medications, &target, dosage) else {
            let alternatives = self.lookup_alternatives(&target);
            info!(target = %target, alternatives = alternatives.len(), "no catalog match");
            return Ok(MatchOutcome::NoMatch {
                target_term: target,
                alternatives,
            });
        };

        let mut results = ranking::collect_results(self.catalog.pharmacies(), medication, location);
        ranking::rank(&mut results);

        info!(
            medication_id = %medication.id,
            results = results.len(),
            measured = location.is_some(),
            "search matched"
        );

        Ok(MatchOutcome::Matched {
            medication: medication.clone(),
            results,
        })
    }

    /// Read a prescription photo and search for the first medication on it.
    pub fn search_prescription(
        &self,
        image: &[u8],
        location: Option<&Coordinates>,
    ) -> PrescriptionSearch {
        let names = match &self.prescriptions {
            Some(reader) => reader.read_prescription(image).unwrap_or_else(|e| {
                warn!(error = %e, "prescription reading failed");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let Some(first) = names.first() else {
            return PrescriptionSearch::Unreadable;
        };

        match self.search(first, None, location) {
            Ok(outcome) => PrescriptionSearch::Searched {
                medication_names: names,
                outcome,
            },
            Err(_) => PrescriptionSearch::Unreadable,
        }
    }

    /// Interpreter guess, or the raw query when the interpreter is absent or fails.
    fn target_term(&self, query: &str) -> String {
        let Some(interpreter) = &self.interpreter else {
            return query.to_string();
        };

        match interpreter.interpret(query) {
            Ok(interpreted) if !interpreted.medication_name.trim().is_empty() => {
                debug!(
                    medication_name = %interpreted.medication_name,
                    symptom = interpreted.is_symptom_description,
                    "query interpreted"
                );
                interpreted.medication_name.trim().to_string()
            }
            Ok(_) => {
                warn!("interpreter returned an empty name; using literal query");
                query.to_string()
            }
            Err(e) => {
                warn!(error = %e, "query interpretation failed; using literal query");
                query.to_string()
            }
        }
    }

    fn lookup_alternatives(&self, term: &str) -> Vec<String> {
        let Some(source) = &self.alternatives else {
            return Vec::new();
        };

        source.alternatives(term).unwrap_or_else(|e| {
            warn!(error = %e, "alternatives lookup failed");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, AiResult, InterpretedQuery, UrgencyLevel};
    use crate::catalog::seed::seed_medications;
    use crate::models::{PharmacyRecord, PharmacyStockEntry, StockStatus};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedInterpreter(&'static str);

    impl QueryInterpreter for FixedInterpreter {
        fn interpret(&self, _query: &str) -> AiResult<InterpretedQuery> {
            Ok(InterpretedQuery {
                medication_name: self.0.to_string(),
                category: None,
                urgency_level: UrgencyLevel::Low,
                is_symptom_description: false,
            })
        }
    }

    struct FailingInterpreter;

    impl QueryInterpreter for FailingInterpreter {
        fn interpret(&self, _query: &str) -> AiResult<InterpretedQuery> {
            Err(AiError::Timeout(15))
        }
    }

    struct CountingAlternatives {
        calls: AtomicUsize,
        fail: bool,
    }

    impl AlternativesSource for CountingAlternatives {
        fn alternatives(&self, _term: &str) -> AiResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AiError::Transport("connection reset".into()))
            } else {
                Ok(vec!["Efferalgan".into(), "Doliprane".into(), "Advil".into()])
            }
        }
    }

    struct FixedPrescription(Vec<String>);

    impl PrescriptionReader for FixedPrescription {
        fn read_prescription(&self, _image: &[u8]) -> AiResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn pharmacy(id: &str, lat: f64, stock: &[(&str, StockStatus)]) -> PharmacyRecord {
        let mut p = PharmacyRecord::new(id.into(), id.into(), "Douala".into(), Coordinates::new(lat, 9.77));
        p.stock = stock
            .iter()
            .map(|(med, status)| PharmacyStockEntry::new(med.to_string(), *status, 20, Utc::now()))
            .collect();
        p
    }

    fn catalog() -> Arc<CatalogStore> {
        let pharmacies = vec![
            pharmacy("p0", 4.30, &[("m2", StockStatus::InStock)]),
            pharmacy("p1", 4.06, &[("m2", StockStatus::LowStock), ("m1", StockStatus::InStock)]),
            pharmacy("p2", 4.10, &[("m1", StockStatus::OutOfStock)]),
            pharmacy("p3", 4.05, &[("m2", StockStatus::InStock)]),
        ];
        Arc::new(CatalogStore::new(seed_medications(), pharmacies).unwrap())
    }

    fn here() -> Coordinates {
        Coordinates::new(4.05, 9.77)
    }

    #[test]
    fn test_empty_query_rejected() {
        let engine = SearchEngine::new(catalog());
        assert_eq!(engine.search("   ", None, None), Err(SearchError::EmptyQuery));
    }

    #[test]
    fn test_match_ranks_results() {
        let engine = SearchEngine::new(catalog());
        let outcome = engine.search("Amoxil", None, Some(&here())).unwrap();

        assert_eq!(outcome.medication().map(|m| m.name.as_str()), Some("Amoxil"));
        let ids: Vec<_> = outcome.results().iter().map(|r| r.pharmacy.id.as_str()).collect();
        // in-stock nearest, in-stock far, then low stock
        assert_eq!(ids, vec!["p3", "p0", "p1"]);
        assert!(outcome.results().iter().all(|r| r.distance.is_measured()));
        assert!(outcome.results().iter().all(|r| r.stock.medication_id == "m2"));
    }

    #[test]
    fn test_match_without_stockists_is_empty() {
        let engine = SearchEngine::new(catalog());
        let outcome = engine.search("Lantus", None, None).unwrap();
        assert_eq!(outcome.medication().map(|m| m.id.as_str()), Some("m4"));
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_unknown_location_uses_estimates() {
        let engine = SearchEngine::new(catalog());
        let first = engine.search("Amoxil", None, None).unwrap();
        let second = engine.search("Amoxil", None, None).unwrap();

        assert!(first.results().iter().all(|r| !r.distance.is_measured()));
        assert_eq!(first.results(), second.results());
    }

    #[test]
    fn test_interpreter_supplies_target() {
        let engine = SearchEngine::new(catalog()).with_interpreter(Arc::new(FixedInterpreter("Coartem")));
        let outcome = engine.search("fever and chills", None, None).unwrap();
        assert_eq!(outcome.medication().map(|m| m.id.as_str()), Some("m1"));
    }

    #[test]
    fn test_interpreter_failure_falls_back_to_literal() {
        let engine = SearchEngine::new(catalog()).with_interpreter(Arc::new(FailingInterpreter));
        let outcome = engine.search("Ventolin", None, None).unwrap();
        assert_eq!(outcome.medication().map(|m| m.id.as_str()), Some("m5"));
    }

    #[test]
    fn test_blank_interpretation_falls_back_to_literal() {
        let engine = SearchEngine::new(catalog()).with_interpreter(Arc::new(FixedInterpreter("  ")));
        let outcome = engine.search("Mopral", None, None).unwrap();
        assert_eq!(outcome.medication().map(|m| m.id.as_str()), Some("m10"));
    }

    #[test]
    fn test_no_match_returns_alternatives() {
        let source = Arc::new(CountingAlternatives {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let engine = SearchEngine::new(catalog()).with_alternatives(source.clone());
        let outcome = engine.search("Panadol", None, None).unwrap();

        match outcome {
            MatchOutcome::NoMatch { target_term, alternatives } => {
                assert_eq!(target_term, "Panadol");
                assert_eq!(alternatives.len(), 3);
            }
            other => panic!("expected no match, got {:?}", other),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_alternatives_not_consulted_on_match() {
        let source = Arc::new(CountingAlternatives {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let engine = SearchEngine::new(catalog()).with_alternatives(source.clone());
        engine.search("Amoxil", None, None).unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_alternatives_failure_degrades_to_empty() {
        let source = Arc::new(CountingAlternatives {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let engine = SearchEngine::new(catalog()).with_alternatives(source);
        let outcome = engine.search("Panadol", None, None).unwrap();
        assert!(matches!(outcome, MatchOutcome::NoMatch { ref alternatives, .. } if alternatives.is_empty()));
    }

    #[test]
    fn test_dosage_never_removes_match() {
        let engine = SearchEngine::new(catalog());
        let outcome = engine.search("Amoxil", Some("250mg"), None).unwrap();
        assert_eq!(outcome.medication().map(|m| m.dosage.as_str()), Some("500mg"));
    }

    #[test]
    fn test_prescription_search() {
        let reader = FixedPrescription(vec!["Coartem".into(), "Doliprane".into()]);
        let engine = SearchEngine::new(catalog()).with_prescription_reader(Arc::new(reader));

        match engine.search_prescription(b"jpeg", None) {
            PrescriptionSearch::Searched { medication_names, outcome } => {
                assert_eq!(medication_names.len(), 2);
                assert_eq!(outcome.medication().map(|m| m.id.as_str()), Some("m1"));
            }
            PrescriptionSearch::Unreadable => panic!("expected a search"),
        }
    }

    #[test]
    fn test_prescription_unreadable() {
        let engine = SearchEngine::new(catalog()).with_prescription_reader(Arc::new(FixedPrescription(vec![])));
        assert_eq!(engine.search_prescription(b"jpeg", None), PrescriptionSearch::Unreadable);

        let engine = SearchEngine::new(catalog());
        assert_eq!(engine.search_prescription(b"jpeg", None), PrescriptionSearch::Unreadable);
    }
}
