//! Substring matching of a target term against the catalog.
//!
//! First match in catalog order wins. There is no relevance ranking, so a short
//! term can hit an unrelated drug whose category happens to contain it.

use crate::models::MedicationRecord;

/// First medication whose name or category contains `term` (case-insensitive).
pub fn find_match<'a>(medications: &'a [MedicationRecord], term: &str) -> Option<&'a MedicationRecord> {
    let term_lower = term.to_lowercase();
    medications
        .iter()
        .find(|m| m.name_or_category_contains(&term_lower))
}

/// First medication whose name or generic name contains `term` and whose dosage
/// contains `dosage`. `None` when no such variant exists.
pub fn find_dosage_variant<'a>(
    medications: &'a [MedicationRecord],
    term: &str,
    dosage: &str,
) -> Option<&'a MedicationRecord> {
    let term_lower = term.to_lowercase();
    let dosage_lower = dosage.to_lowercase();
    medications
        .iter()
        .find(|m| m.name_or_generic_contains(&term_lower) && m.dosage_contains(&dosage_lower))
}

/// Match `term`, then narrow to a dosage variant when one exists.
///
/// A dosage that matches nothing keeps the unrefined match.
pub fn resolve<'a>(
    medications: &'a [MedicationRecord],
    term: &str,
    dosage: Option<&str>,
) -> Option<&'a MedicationRecord> {
    let matched = find_match(medications, term)?;

    match dosage.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Some(find_dosage_variant(medications, term, d).unwrap_or(matched)),
        None => Some(matched),
    }
}
