//! Pharmacy and stock models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability of one medication at one pharmacy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Ranking tier: in-stock pharmacies come first, everything else is "not in stock".
    pub fn availability_tier(self) -> u8 {
        match self {
            StockStatus::InStock => 0,
            StockStatus::LowStock | StockStatus::OutOfStock => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::LowStock => "LOW_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in km, rounded to one decimal.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        crate::geo::distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Stock entry for a medication, owned by a pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PharmacyStockEntry {
    /// Lookup key into the medication catalog
    pub medication_id: String,
    pub status: StockStatus,
    /// Units on hand (always 0 when out of stock)
    pub quantity: u32,
    /// When the pharmacy last reported this entry
    pub updated_at: DateTime<Utc>,
    /// Pharmacy-specific price, if it differs from the catalog price
    pub price: Option<u32>,
}

impl PharmacyStockEntry {
    /// Create a stock entry. Quantity is forced to 0 for out-of-stock entries.
    pub fn new(
        medication_id: String,
        status: StockStatus,
        quantity: u32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let quantity = match status {
            StockStatus::OutOfStock => 0,
            _ => quantity,
        };
        Self {
            medication_id,
            status,
            quantity,
            updated_at,
            price: None,
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    /// Human-readable freshness ("12 mins ago") relative to `now`.
    pub fn freshness_label(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.updated_at).num_minutes().max(0);
        match minutes {
            0 => "just now".to_string(),
            1 => "1 min ago".to_string(),
            m if m < 60 => format!("{} mins ago", m),
            m if m < 120 => "1 hour ago".to_string(),
            m => format!("{} hours ago", m / 60),
        }
    }

    /// Whether the entry respects the quantity invariant.
    pub fn is_consistent(&self) -> bool {
        self.status != StockStatus::OutOfStock || self.quantity == 0
    }
}

/// A pharmacy in the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PharmacyRecord {
    /// Unique identifier (e.g., "p12")
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub location: Coordinates,
    /// Certified partner pharmacy
    pub verified: bool,
    /// Currently open
    pub open: bool,
    pub phone: String,
    /// Stock entries, at most one per medication
    pub stock: Vec<PharmacyStockEntry>,
}

impl PharmacyRecord {
    /// Create a pharmacy with no stock.
    pub fn new(id: String, name: String, city: String, location: Coordinates) -> Self {
        Self {
            address: city.clone(),
            id,
            name,
            city,
            location,
            verified: true,
            open: true,
            phone: String::new(),
            stock: Vec::new(),
        }
    }

    /// Find the stock entry for a medication.
    pub fn stock_for(&self, medication_id: &str) -> Option<&PharmacyStockEntry> {
        self.stock.iter().find(|s| s.medication_id == medication_id)
    }

    /// Count entries with the given status.
    pub fn count_status(&self, status: StockStatus) -> usize {
        self.stock.iter().filter(|s| s.status == status).count()
    }
}
