//! Composition and ordering of per-pharmacy results.

use std::cmp::Ordering;

use crate::models::{Coordinates, Distance, MedicationRecord, PharmacyRecord, SearchResult};

/// Range of placeholder distances, in whole km, used without a caller location.
const ESTIMATE_MIN_KM: u64 = 1;
const ESTIMATE_SPAN_KM: u64 = 10;

/// Placeholder distance for a pharmacy when the caller location is unknown.
///
/// Derived from the pharmacy id with FNV-1a so it is stable across runs.
pub fn estimated_distance(pharmacy_id: &str) -> Distance {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in pharmacy_id.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    Distance::Estimated((ESTIMATE_MIN_KM + hash % ESTIMATE_SPAN_KM) as f64)
}

/// Distance from `origin` to `pharmacy`, measured or estimated.
pub fn distance_to(pharmacy: &PharmacyRecord, origin: Option<&Coordinates>) -> Distance {
    match origin {
        Some(origin) => Distance::Measured(origin.distance_km(&pharmacy.location)),
        None => estimated_distance(&pharmacy.id),
    }
}

/// One result per pharmacy that stocks `medication`; pharmacies without an entry are skipped.
pub fn collect_results(
    pharmacies: &[PharmacyRecord],
    medication: &MedicationRecord,
    origin: Option<&Coordinates>,
) -> Vec<SearchResult> {
    pharmacies
        .iter()
        .filter_map(|pharmacy| {
            let stock = pharmacy.stock_for(&medication.id)?;
            Some(SearchResult {
                pharmacy: pharmacy.clone(),
                medication: medication.clone(),
                stock: stock.clone(),
                distance: distance_to(pharmacy, origin),
            })
        })
        .collect()
}

/// In-stock first, then nearest.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.stock
        .status
        .availability_tier()
        .cmp(&b.stock.status.availability_tier())
        .then_with(|| a.distance.km().total_cmp(&b.distance.km()))
}

/// Stable sort; ties keep input order.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_by(compare_results);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PharmacyStockEntry, StockStatus};
    use chrono::Utc;
    use proptest::prelude::*;

    fn med() -> MedicationRecord {
        MedicationRecord::new("m2".into(), "Amoxil".into(), "Amoxicillin".into(), "500mg".into(), "Antibiotic".into())
    }

    fn result(id: &str, status: StockStatus, km: f64) -> SearchResult {
        let mut pharmacy = PharmacyRecord::new(id.into(), id.into(), "Douala".into(), Coordinates::new(4.0, 9.7));
        let stock = PharmacyStockEntry::new("m2".into(), status, 10, Utc::now());
        pharmacy.stock.push(stock.clone());
        SearchResult {
            pharmacy,
            medication: med(),
            stock,
            distance: Distance::Measured(km),
        }
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.pharmacy.id.as_str()).collect()
    }

    #[test]
    fn test_in_stock_before_nearer_low_stock() {
        let mut results = vec![
            result("near-low", StockStatus::LowStock, 0.5),
            result("far-in", StockStatus::InStock, 12.0),
        ];
        rank(&mut results);
        assert_eq!(ids(&results), vec!["far-in", "near-low"]);
    }

    #[test]
    fn test_low_and_out_not_distinguished() {
        let mut results = vec![
            result("low-far", StockStatus::LowStock, 9.0),
            result("out-near", StockStatus::OutOfStock, 2.0),
        ];
        rank(&mut results);
        assert_eq!(ids(&results), vec!["out-near", "low-far"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut results = vec![
            result("a", StockStatus::LowStock, 3.0),
            result("b", StockStatus::OutOfStock, 3.0),
            result("c", StockStatus::InStock, 3.0),
            result("d", StockStatus::InStock, 3.0),
        ];
        rank(&mut results);
        assert_eq!(ids(&results), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_collect_skips_pharmacies_without_entry() {
        let stocked = result("p1", StockStatus::InStock, 0.0).pharmacy;
        let empty = PharmacyRecord::new("p2".into(), "p2".into(), "Buea".into(), Coordinates::new(4.15, 9.23));
        let results = collect_results(&[stocked, empty], &med(), None);
        assert_eq!(ids(&results), vec!["p1"]);
    }

    #[test]
    fn test_estimated_distance_is_stable_and_bounded() {
        for id in ["p0", "p1", "p42", "p149"] {
            let d = estimated_distance(id);
            assert!(!d.is_measured());
            assert_eq!(d, estimated_distance(id));
            assert!((1.0..=10.0).contains(&d.km()));
        }
    }

    #[test]
    fn test_measured_distance_with_origin() {
        let pharmacy = result("p1", StockStatus::InStock, 0.0).pharmacy;
        let origin = Coordinates::new(4.0, 9.7);
        assert_eq!(distance_to(&pharmacy, Some(&origin)), Distance::Measured(0.0));
    }

    fn status_strategy() -> impl Strategy<Value = StockStatus> {
        prop_oneof![
            Just(StockStatus::InStock),
            Just(StockStatus::LowStock),
            Just(StockStatus::OutOfStock),
        ]
    }

    proptest! {
        #[test]
        fn ranked_order_respects_tier_then_distance(
            entries in proptest::collection::vec((status_strategy(), 0.0..50.0f64), 0..30)
        ) {
            let mut results: Vec<SearchResult> = entries
                .iter()
                .enumerate()
                .map(|(i, (status, km))| result(&format!("p{}", i), *status, *km))
                .collect();
            rank(&mut results);

            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let (ta, tb) = (a.stock.status.availability_tier(), b.stock.status.availability_tier());
                prop_assert!(ta <= tb);
                if ta == tb {
                    prop_assert!(a.distance.km() <= b.distance.km());
                }
            }
        }
    }
}
