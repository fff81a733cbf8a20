//! Security model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{LatestPrice, Money, PriceEntry};
use super::ledger::PriceHistory;
use crate::error::Result;

/// Security event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityEventType {
    StockSplit,
    DividendPayment,
    Note,
}

/// Security event (stock split, dividend announcement, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEvent {
    pub date: NaiveDate,
    pub event_type: SecurityEventType,
    /// Details (e.g., "4:1" for stock split)
    pub details: Option<String>,
}

/// Dividend event with payment information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    /// Declaration/ex-dividend date
    pub date: NaiveDate,
    pub source: Option<String>,
    pub payment_date: Option<NaiveDate>,
    /// Dividend amount per share
    pub amount: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityEventKind {
    Event(SecurityEvent),
    Dividend(DividendEvent),
}

/// A security (stock, ETF, fund, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub uuid: String,
    pub name: String,
    pub currency: String,
    /// Target currency for currency conversion (e.g., for exchange rate securities)
    pub target_currency: Option<String>,
    /// Online ID for data providers
    pub online_id: Option<String>,
    /// ISIN (International Securities Identification Number)
    pub isin: Option<String>,
    /// WKN (German security identification)
    pub wkn: Option<String>,
    pub ticker: Option<String>,
    /// Historical price feed identifier
    pub feed: Option<String>,
    /// Latest/current price feed identifier
    pub latest_feed: Option<String>,
    /// Historical prices, sorted by date
    pub prices: Vec<PriceEntry>,
    pub latest: Option<LatestPrice>,
    /// Security events (splits, dividends, etc.)
    pub events: Vec<SecurityEventKind>,
    /// Custom attributes (user-defined key-value pairs)
    pub attributes: HashMap<String, String>,
    /// Whether the security is retired/inactive
    pub is_retired: bool,
    pub note: Option<String>,
}

impl Security {
    pub fn new(uuid: String, name: String, currency: String) -> Self {
        Self {
            uuid,
            name,
            currency,
            target_currency: None,
            online_id: None,
            isin: None,
            wkn: None,
            ticker: None,
            feed: None,
            latest_feed: None,
            prices: Vec::new(),
            latest: None,
            events: Vec::new(),
            attributes: HashMap::new(),
            is_retired: false,
            note: None,
        }
    }
}

impl PriceHistory for Security {
    /// Add a price entry (maintains sorted order by date)
    fn add_price(&mut self, entry: PriceEntry) -> Result<()> {
        match self.prices.binary_search_by_key(&entry.date, |e| e.date) {
            Ok(pos) => self.prices[pos] = entry,
            Err(pos) => self.prices.insert(pos, entry),
        }
        Ok(())
    }
}

impl Default for Security {
    fn default() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            String::new(),
            "EUR".to_string(),
        )
    }
}
