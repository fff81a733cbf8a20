//! Portfolio Performance ledger models.
//!
//! This module contains the domain models of a client ledger: accounts,
//! portfolios, securities, taxonomies and the transactions between them.

pub mod account;
pub mod client;
pub mod common;
pub mod index;
pub mod ledger;
pub mod portfolio;
pub mod security;
pub mod taxonomy;
pub mod transaction;

// Re-export main types for convenience
pub use account::Account;
pub use client::Client;
pub use common::{ForexInfo, LatestPrice, Money, PriceEntry, AMOUNT_FACTOR, SHARES_FACTOR};
pub use index::{LedgerIndex, TransactionRef};
pub use ledger::{Ledger, PriceHistory, TransactionLedger};
pub use portfolio::Portfolio;
pub use security::{DividendEvent, Security, SecurityEvent, SecurityEventKind, SecurityEventType};
pub use taxonomy::{Classification, ClassificationAssignment, Taxonomy};
pub use transaction::{
    AccountTransaction, AccountTransactionType, CrossEntry, CrossEntryType,
    PortfolioTransaction, PortfolioTransactionType, TransactionUnit, UnitType,
};
