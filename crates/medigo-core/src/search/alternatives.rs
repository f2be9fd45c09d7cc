//! Offline alternatives source: fuzzy suggestions drawn from the catalog itself.

use std::collections::HashSet;
use std::sync::Arc;

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::ai::{AiResult, AlternativesSource};
use crate::catalog::CatalogStore;

/// Number of suggestions returned.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum similarity to be suggested.
const MIN_SIMILARITY: f64 = 0.55;

/// Suggests catalog brand names whose name or generic name resembles the term.
pub struct CatalogAlternatives {
    catalog: Arc<CatalogStore>,
}

impl CatalogAlternatives {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Ranked, de-duplicated brand names.
    pub fn suggest(&self, term: &str) -> Vec<String> {
        let term_lower = term.trim().to_lowercase();
        if term_lower.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .catalog
            .medications()
            .iter()
            .map(|m| {
                let score = fuzzy_match(&term_lower, &m.name.to_lowercase())
                    .max(fuzzy_match(&term_lower, &m.generic_name.to_lowercase()));
                (score, m.name.as_str())
            })
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .collect();

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut seen = HashSet::new();
        scored
            .into_iter()
            .filter(|(_, name)| seen.insert(*name))
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

impl AlternativesSource for CatalogAlternatives {
    fn alternatives(&self, term: &str) -> AiResult<Vec<String>> {
        Ok(self.suggest(term))
    }
}

/// Combined similarity: Jaro-Winkler for typos and prefixes, Levenshtein for overall shape.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);
    jw * 0.6 + lev * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::seed_medications;

    fn source() -> CatalogAlternatives {
        let store = CatalogStore::new(seed_medications(), vec![]).unwrap();
        CatalogAlternatives::new(Arc::new(store))
    }

    #[test]
    fn test_generic_name_suggests_brand() {
        let suggestions = source().suggest("paracetamol");
        assert_eq!(suggestions.first().map(String::as_str), Some("Doliprane"));
        // Two Doliprane strengths collapse to one suggestion
        assert_eq!(suggestions.iter().filter(|s| *s == "Doliprane").count(), 1);
    }

    #[test]
    fn test_typo_suggests_closest() {
        let suggestions = source().suggest("Amoxicilin");
        assert_eq!(suggestions.first().map(String::as_str), Some("Amoxil"));
    }

    #[test]
    fn test_limit_and_nonsense() {
        let src = source();
        assert!(src.suggest("a").len() <= MAX_SUGGESTIONS);
        assert!(src.suggest("qqqqzzzzxxxx").is_empty());
        assert!(src.suggest("   ").is_empty());
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("coartem", "coartem") > 0.99);
        assert!(fuzzy_match("coartem", "coartme") > 0.8);
        assert!(fuzzy_match("coartem", "lantus") < 0.5);
    }
}
