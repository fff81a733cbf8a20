//! Common value types shared across the ledger model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Factor for converting shares (PP stores shares * 10^8)
pub const SHARES_FACTOR: i64 = 100_000_000;

/// Factor for converting amounts (PP stores amounts in cents)
pub const AMOUNT_FACTOR: i64 = 100;

/// Monetary amount with currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in smallest currency units (e.g., cents for EUR)
    pub amount: i64,
    /// ISO 4217 currency code (e.g., "EUR", "USD")
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Forex conversion information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexInfo {
    /// Amount in foreign currency (smallest units)
    pub amount: Money,
    /// Exchange rate used for conversion
    pub exchange_rate: f64,
}

/// Price entry for a security at a specific date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub date: NaiveDate,
    /// Price in smallest currency units * 10^8
    pub value: i64,
}

impl PriceEntry {
    pub fn new(date: NaiveDate, value: i64) -> Self {
        Self { date, value }
    }
}

/// Latest price with additional market data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestPrice {
    pub date: Option<NaiveDate>,
    /// Price in smallest currency units * 10^8
    pub value: Option<i64>,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub volume: Option<i64>,
}

/// Helper functions for share conversions
pub mod shares {
    use super::SHARES_FACTOR;

    /// Convert from PP internal format (shares * 10^8) to decimal
    pub fn to_decimal(shares: i64) -> f64 {
        shares as f64 / SHARES_FACTOR as f64
    }
}
