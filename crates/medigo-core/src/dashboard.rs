//! Summaries behind the pharmacy-partner and admin dashboards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, CatalogResult, CatalogStore};
use crate::models::{ReportKind, ReportStatus, StockStatus};

/// Number of medications listed in the network shortage table.
pub const SHORTAGE_LIMIT: usize = 5;

const REPORT_KINDS: [ReportKind; 3] = [ReportKind::PriceMismatch, ReportKind::FakeDrug, ReportKind::PoorService];

/// One inventory line of a pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRow {
    pub medication_id: String,
    pub name: String,
    pub category: String,
    pub status: StockStatus,
    pub quantity: u32,
    /// Pharmacy override, else the catalog price
    pub price: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PharmacyDashboard {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    pub active_orders: usize,
    pub low_stock_alerts: usize,
    pub out_of_stock: usize,
    /// Sum of order totals in XAF
    pub revenue: u64,
    pub inventory: Vec<InventoryRow>,
}

impl PharmacyDashboard {
    /// Partner view for `pharmacy_id`, inventory filtered by a name substring.
    pub fn build(catalog: &CatalogStore, pharmacy_id: &str, search_term: &str) -> CatalogResult<Self> {
        let pharmacy = catalog
            .pharmacy(pharmacy_id)
            .ok_or_else(|| CatalogError::UnknownPharmacy(pharmacy_id.to_string()))?;

        let term = search_term.trim().to_lowercase();
        let inventory = pharmacy
            .stock
            .iter()
            .filter_map(|entry| {
                let med = catalog.medication(&entry.medication_id)?;
                Some(InventoryRow {
                    medication_id: med.id.clone(),
                    name: med.name.clone(),
                    category: med.category.clone(),
                    status: entry.status,
                    quantity: entry.quantity,
                    price: entry.price.unwrap_or(med.price.amount),
                })
            })
            .filter(|row| row.name.to_lowercase().contains(&term))
            .collect();

        let orders = catalog.orders();
        Ok(Self {
            pharmacy_id: pharmacy.id.clone(),
            pharmacy_name: pharmacy.name.clone(),
            active_orders: orders.iter().filter(|o| o.is_active()).count(),
            low_stock_alerts: pharmacy.count_status(StockStatus::LowStock),
            out_of_stock: pharmacy.count_status(StockStatus::OutOfStock),
            revenue: orders.iter().map(|o| u64::from(o.total)).sum(),
            inventory,
        })
    }
}

/// A medication missing from many pharmacies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shortage {
    pub medication_id: String,
    pub name: String,
    pub out_of_stock_pharmacies: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminDashboard {
    pub pharmacy_count: usize,
    /// Fraction of verified pharmacies, 0.0 for an empty network
    pub verified_share: f64,
    pub open_reports: usize,
    pub reports_by_kind: Vec<(ReportKind, usize)>,
    pub shortages: Vec<Shortage>,
}

impl AdminDashboard {
    pub fn build(catalog: &CatalogStore) -> Self {
        let pharmacies = catalog.pharmacies();
        let verified = pharmacies.iter().filter(|p| p.verified).count();
        let verified_share = if pharmacies.is_empty() {
            0.0
        } else {
            verified as f64 / pharmacies.len() as f64
        };

        let reports = catalog.reports();
        let reports_by_kind = REPORT_KINDS
            .iter()
            .map(|kind| (*kind, reports.iter().filter(|r| r.kind == *kind).count()))
            .collect();

        Self {
            pharmacy_count: pharmacies.len(),
            verified_share,
            open_reports: reports.iter().filter(|r| r.status == ReportStatus::Open).count(),
            reports_by_kind,
            shortages: shortages(catalog, SHORTAGE_LIMIT),
        }
    }
}

/// Medications with the most out-of-stock entries; ties keep catalog order.
pub fn shortages(catalog: &CatalogStore, limit: usize) -> Vec<Shortage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for pharmacy in catalog.pharmacies() {
        for entry in &pharmacy.stock {
            if entry.status == StockStatus::OutOfStock {
                *counts.entry(entry.medication_id.as_str()).or_default() += 1;
            }
        }
    }

    let mut list: Vec<Shortage> = catalog
        .medications()
        .iter()
        .filter_map(|m| {
            let count = counts.get(m.id.as_str()).copied().unwrap_or(0);
            (count > 0).then(|| Shortage {
                medication_id: m.id.clone(),
                name: m.name.clone(),
                out_of_stock_pharmacies: count,
            })
        })
        .collect();

    list.sort_by(|a, b| b.out_of_stock_pharmacies.cmp(&a.out_of_stock_pharmacies));
    list.truncate(limit);
    list
}
