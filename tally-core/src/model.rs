//! Sale/report data model consumed by the tax engine and document encoders
//!
//! These are plain input structs. The core never fetches or stores them;
//! the host application supplies them per print/preview request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tax rate from the host's rate table.
///
/// At most one rate per table may carry `is_default` — the surrounding CRUD
/// enforces that; the engine only assumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    pub percent: Decimal,
    pub is_default: bool,
}

/// One sale/report line.
///
/// `quantity` may be fractional (weighed goods). `tax_rate_id` of `None`
/// falls back to the default rate, then to 0%.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
    pub mrp: Decimal,
    pub tax_rate_id: Option<String>,
}

impl LineItem {
    /// Line amount before tax: quantity * unit rate
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_rate
    }
}

/// Store identity printed at the top of every document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreIdentity {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub gstin: Option<String>,
}

impl Default for StoreIdentity {
    /// Fixed fallback identity used when the host has configured none.
    fn default() -> Self {
        Self {
            name: "TALLY STORE".to_string(),
            address: None,
            phone: None,
            gstin: None,
        }
    }
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "CASH"),
            Self::Card => write!(f, "CARD"),
            Self::Upi => write!(f, "UPI"),
        }
    }
}

/// A single sale, ready to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub bill_no: String,
    /// Epoch millis
    pub created_at: i64,
    pub store: Option<StoreIdentity>,
    pub lines: Vec<LineItem>,
    pub payment_mode: PaymentMode,
}

/// Aggregate sales report over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub title: String,
    /// Epoch millis, inclusive range
    pub from_ts: i64,
    pub to_ts: i64,
    pub store: Option<StoreIdentity>,
    pub lines: Vec<LineItem>,
}

/// Format epoch millis for printing (dd/mm/yyyy HH:MM)
pub(crate) fn format_timestamp(ts: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(ts) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => "--/--/----".to_string(),
    }
}

/// Format epoch millis as a date only (dd/mm/yyyy)
pub(crate) fn format_date(ts: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(ts) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "--/--/----".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn test_line_amount() {
        let line = LineItem {
            name: "Coca Cola".to_string(),
            quantity: Decimal::from(2),
            unit_rate: Decimal::from(45),
            mrp: Decimal::from(50),
            tax_rate_id: None,
        };
        assert_eq!(line.amount(), Decimal::from(90));
    }

    #[test]
    fn test_fractional_quantity_amount() {
        // Weighed goods: 0.250 kg at 120/kg
        let line = LineItem {
            name: "Almonds".to_string(),
            quantity: Decimal::new(250, 3),
            unit_rate: Decimal::from(120),
            mrp: Decimal::from(120),
            tax_rate_id: None,
        };
        assert_eq!(line.amount(), Decimal::from(30));
    }

    #[test]
    fn test_format_timestamp() {
        // 2024-01-22 14:32:15 UTC
        assert_eq!(format_timestamp(1705912335000), "22/01/2024 14:32");
        assert_eq!(format_date(1705912335000), "22/01/2024");
    }

    #[test]
    fn test_default_store_identity() {
        let store = StoreIdentity::default();
        assert_eq!(store.name, "TALLY STORE");
        assert!(store.address.is_none());
    }
}
