//! Mock operational records shown on the partner and admin dashboards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Ready,
    Completed,
}

/// A customer order placed with a pharmacy partner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    /// Item labels (e.g., "Coartem 80/480mg")
    pub items: Vec<String>,
    /// Total in XAF
    pub total: u32,
    pub status: OrderStatus,
    /// Time of day label (e.g., "10:30 AM")
    pub time: String,
}

impl Order {
    /// Orders that still need action from the pharmacy.
    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Completed
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    PriceMismatch,
    FakeDrug,
    PoorService,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Open,
    Resolved,
}

/// A user report filed against a pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: String,
    pub kind: ReportKind,
    pub pharmacy_name: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: ReportStatus,
}
