//! Transaction types for the ledger.
//!
//! Transactions belong to either accounts (AccountTransaction) or
//! portfolios (PortfolioTransaction). They share common fields but have
//! different transaction types. Two transactions describing one economic
//! event are paired by a [`CrossEntry`] key; the pair itself is resolved
//! through [`super::index::LedgerIndex`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{ForexInfo, Money};

/// Unit type for transaction components (fees, taxes, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    /// Broker/transaction fee
    Fee,
    /// Tax amount
    Tax,
    /// Gross transaction value (before fees/taxes)
    GrossValue,
}

/// A single unit (component) of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUnit {
    pub unit_type: UnitType,
    pub amount: Money,
    /// Forex information if the unit was in a different currency
    pub forex: Option<ForexInfo>,
}

impl TransactionUnit {
    pub fn new(unit_type: UnitType, amount: Money) -> Self {
        Self {
            unit_type,
            amount,
            forex: None,
        }
    }

    pub fn fee(amount: Money) -> Self {
        Self::new(UnitType::Fee, amount)
    }
}

/// Cross-entry type for linked transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossEntryType {
    /// Transfer between portfolios
    PortfolioTransfer,
    /// Transfer between accounts
    AccountTransfer,
    /// Buy/sell pair (portfolio transaction + account transaction)
    BuySell,
}

/// Cross-entry key linking two related transactions.
///
/// `source_uuid` is the origin leg (the portfolio leg of a buy/sell, the
/// outbound leg of a transfer), `target_uuid` the derived one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossEntry {
    pub entry_type: CrossEntryType,
    /// UUID of the source transaction
    pub source_uuid: String,
    /// UUID of the target transaction
    pub target_uuid: String,
}

impl CrossEntry {
    pub fn portfolio_transfer(source_uuid: String, target_uuid: String) -> Self {
        Self {
            entry_type: CrossEntryType::PortfolioTransfer,
            source_uuid,
            target_uuid,
        }
    }

    pub fn account_transfer(source_uuid: String, target_uuid: String) -> Self {
        Self {
            entry_type: CrossEntryType::AccountTransfer,
            source_uuid,
            target_uuid,
        }
    }

    pub fn buy_sell(source_uuid: String, target_uuid: String) -> Self {
        Self {
            entry_type: CrossEntryType::BuySell,
            source_uuid,
            target_uuid,
        }
    }

    /// UUID of the other leg, or `None` if `uuid` is not part of this entry
    pub fn counterpart_of(&self, uuid: &str) -> Option<&str> {
        if self.source_uuid == uuid {
            Some(&self.target_uuid)
        } else if self.target_uuid == uuid {
            Some(&self.source_uuid)
        } else {
            None
        }
    }
}

/// Account transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTransactionType {
    /// Cash deposit
    Deposit,
    /// Cash withdrawal
    Removal,
    /// Interest income
    Interest,
    /// Interest charge (negative)
    InterestCharge,
    /// Dividend payment
    Dividends,
    /// Fee charge
    Fees,
    /// Fee refund
    FeesRefund,
    /// Tax charge
    Taxes,
    /// Tax refund
    TaxRefund,
    /// Buy (debit when paying from cash)
    Buy,
    /// Sell (credit when receiving cash)
    Sell,
    /// Transfer in from another account
    TransferIn,
    /// Transfer out to another account
    TransferOut,
}

impl AccountTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Removal => "REMOVAL",
            Self::Interest => "INTEREST",
            Self::InterestCharge => "INTEREST_CHARGE",
            Self::Dividends => "DIVIDENDS",
            Self::Fees => "FEES",
            Self::FeesRefund => "FEES_REFUND",
            Self::Taxes => "TAXES",
            Self::TaxRefund => "TAX_REFUND",
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::TransferIn => "TRANSFER_IN",
            Self::TransferOut => "TRANSFER_OUT",
        }
    }

    /// Is this a credit (money coming in)?
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            Self::Deposit
                | Self::Interest
                | Self::Dividends
                | Self::FeesRefund
                | Self::TaxRefund
                | Self::Sell
                | Self::TransferIn
        )
    }
}

/// Portfolio transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioTransactionType {
    /// Purchase of securities
    Buy,
    /// Sale of securities
    Sell,
    /// Transfer in from another portfolio
    TransferIn,
    /// Transfer out to another portfolio
    TransferOut,
    /// Delivery inbound (non-cash inflow)
    DeliveryInbound,
    /// Delivery outbound (non-cash outflow)
    DeliveryOutbound,
}

impl PortfolioTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::TransferIn => "TRANSFER_IN",
            Self::TransferOut => "TRANSFER_OUT",
            Self::DeliveryInbound => "DELIVERY_INBOUND",
            Self::DeliveryOutbound => "DELIVERY_OUTBOUND",
        }
    }

    /// Is this a purchase (shares coming in)?
    pub fn is_purchase(&self) -> bool {
        matches!(self, Self::Buy | Self::TransferIn | Self::DeliveryInbound)
    }
}

/// Account transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTransaction {
    pub uuid: String,
    pub date: NaiveDateTime,
    pub transaction_type: AccountTransactionType,
    pub amount: Money,
    /// Number of shares (for dividends) - stored as shares * 10^8
    pub shares: Option<i64>,
    /// Reference to security (for dividends, interest from securities)
    pub security_uuid: Option<String>,
    /// Transaction units (fees, taxes, forex)
    pub units: Vec<TransactionUnit>,
    /// Cross-entry key for linked transactions
    pub cross_entry: Option<CrossEntry>,
    pub note: Option<String>,
    /// Source document reference
    pub source: Option<String>,
}

impl AccountTransaction {
    pub fn new(
        uuid: String,
        date: NaiveDateTime,
        transaction_type: AccountTransactionType,
        amount: Money,
    ) -> Self {
        Self {
            uuid,
            date,
            transaction_type,
            amount,
            shares: None,
            security_uuid: None,
            units: Vec::new(),
            cross_entry: None,
            note: None,
            source: None,
        }
    }

    /// Signed effect on the account balance
    pub fn cash_effect(&self) -> i64 {
        if self.transaction_type.is_credit() {
            self.amount.amount
        } else {
            -self.amount.amount
        }
    }
}

/// Portfolio transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransaction {
    pub uuid: String,
    pub date: NaiveDateTime,
    pub transaction_type: PortfolioTransactionType,
    pub amount: Money,
    /// Number of shares - stored as shares * 10^8
    pub shares: i64,
    /// Reference to security
    pub security_uuid: Option<String>,
    /// Transaction units (fees, taxes, forex)
    pub units: Vec<TransactionUnit>,
    /// Cross-entry key for linked transactions
    pub cross_entry: Option<CrossEntry>,
    pub note: Option<String>,
    /// Source document reference
    pub source: Option<String>,
}

impl PortfolioTransaction {
    pub fn new(
        uuid: String,
        date: NaiveDateTime,
        transaction_type: PortfolioTransactionType,
        amount: Money,
        shares: i64,
    ) -> Self {
        Self {
            uuid,
            date,
            transaction_type,
            amount,
            shares,
            security_uuid: None,
            units: Vec::new(),
            cross_entry: None,
            note: None,
            source: None,
        }
    }

    /// Signed effect on the share count
    pub fn share_effect(&self) -> i64 {
        if self.transaction_type.is_purchase() {
            self.shares
        } else {
            -self.shares
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_transaction_type_serialization() {
        let types = vec![
            (PortfolioTransactionType::Buy, "\"BUY\""),
            (PortfolioTransactionType::Sell, "\"SELL\""),
            (PortfolioTransactionType::DeliveryInbound, "\"DELIVERY_INBOUND\""),
            (PortfolioTransactionType::DeliveryOutbound, "\"DELIVERY_OUTBOUND\""),
            (PortfolioTransactionType::TransferIn, "\"TRANSFER_IN\""),
            (PortfolioTransactionType::TransferOut, "\"TRANSFER_OUT\""),
        ];

        for (tx_type, expected) in types {
            let json = serde_json::to_string(&tx_type).unwrap();
            assert_eq!(json, expected, "Serialization of {:?} failed", tx_type);
            assert_eq!(format!("\"{}\"", tx_type.as_str()), expected);
        }
    }

    #[test]
    fn test_cash_and_share_direction() {
        assert!(AccountTransactionType::Deposit.is_credit());
        assert!(!AccountTransactionType::Removal.is_credit());
        assert!(PortfolioTransactionType::Buy.is_purchase());
        assert!(!PortfolioTransactionType::Sell.is_purchase());

        let removal = AccountTransaction::new(
            "tx".to_string(),
            NaiveDateTime::default(),
            AccountTransactionType::Removal,
            Money::new(2500, "EUR"),
        );
        assert_eq!(removal.cash_effect(), -2500);
    }

    #[test]
    fn test_cross_entry_counterpart() {
        let entry = CrossEntry::buy_sell("p-tx".to_string(), "a-tx".to_string());
        assert_eq!(entry.counterpart_of("p-tx"), Some("a-tx"));
        assert_eq!(entry.counterpart_of("a-tx"), Some("p-tx"));
        assert_eq!(entry.counterpart_of("other"), None);
    }

    #[test]
    fn test_cross_entry_keys_deduplicate() {
        use std::collections::HashSet;

        let keys: HashSet<CrossEntry> = [
            CrossEntry::buy_sell("p-tx".to_string(), "a-tx".to_string()),
            CrossEntry::buy_sell("p-tx".to_string(), "a-tx".to_string()),
            CrossEntry::account_transfer("p-tx".to_string(), "a-tx".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_share_effect_by_direction() {
        let mut tx = PortfolioTransaction::new(
            "test".to_string(),
            NaiveDateTime::default(),
            PortfolioTransactionType::Buy,
            Money::new(10000, "EUR"),
            100_000_000,
        );
        assert_eq!(tx.share_effect(), 100_000_000);

        tx.transaction_type = PortfolioTransactionType::DeliveryOutbound;
        assert_eq!(tx.share_effect(), -100_000_000);
    }
}
