//! Read and mutation capabilities of the ledger.
//!
//! Reading goes through [`Ledger`], which both the mutable [`super::Client`]
//! and the read-only filtered client implement. Mutation is split into
//! separate capability traits so a read-only entity can implement them by
//! refusing every call.

use super::account::Account;
use super::common::PriceEntry;
use super::portfolio::Portfolio;
use super::security::Security;
use super::taxonomy::Taxonomy;
use crate::error::Result;

/// Read access to a complete ledger
pub trait Ledger {
    fn base_currency(&self) -> &str;

    fn account_list(&self) -> Vec<&Account>;

    fn portfolio_list(&self) -> Vec<&Portfolio>;

    fn security_list(&self) -> Vec<&Security>;

    fn taxonomy_list(&self) -> &[Taxonomy];

    fn find_account(&self, uuid: &str) -> Option<&Account> {
        self.account_list().into_iter().find(|a| a.uuid == uuid)
    }

    fn find_portfolio(&self, uuid: &str) -> Option<&Portfolio> {
        self.portfolio_list().into_iter().find(|p| p.uuid == uuid)
    }

    fn find_security(&self, uuid: &str) -> Option<&Security> {
        self.security_list().into_iter().find(|s| s.uuid == uuid)
    }

    /// Number of transactions across all accounts and portfolios
    fn transaction_count(&self) -> usize {
        let cash: usize = self.account_list().iter().map(|a| a.transactions.len()).sum();
        let securities: usize = self
            .portfolio_list()
            .iter()
            .map(|p| p.transactions.len())
            .sum();
        cash + securities
    }
}

/// Capability to add and remove transactions of an owner entity
pub trait TransactionLedger {
    type Transaction;

    fn add_transaction(&mut self, transaction: Self::Transaction) -> Result<()>;

    /// Remove a single transaction. This is a shallow delete: the linked
    /// cross-entry leg, if any, is left for the caller to handle.
    fn delete_transaction(&mut self, uuid: &str) -> Result<Self::Transaction>;
}

/// Capability to extend a security's price history
pub trait PriceHistory {
    fn add_price(&mut self, entry: PriceEntry) -> Result<()>;
}
