//! Portfolio model.
//!
//! Portfolios (Depots) hold securities and track buy/sell transactions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ledger::TransactionLedger;
use super::transaction::PortfolioTransaction;
use crate::error::{LedgerError, Result};

/// A securities portfolio (Depot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub uuid: String,
    pub name: String,
    /// Reference to the linked cash account (for settlements)
    pub reference_account_uuid: Option<String>,
    /// Whether the portfolio is retired/inactive
    pub is_retired: bool,
    pub note: Option<String>,
    /// Custom attributes
    pub attributes: HashMap<String, String>,
    /// Portfolio transactions in booking order
    pub transactions: Vec<PortfolioTransaction>,
}

impl Portfolio {
    pub fn new(uuid: String, name: String) -> Self {
        Self {
            uuid,
            name,
            reference_account_uuid: None,
            is_retired: false,
            note: None,
            attributes: HashMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Copy of the portfolio metadata without any transactions
    pub fn empty_copy(&self) -> Self {
        Self {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            reference_account_uuid: self.reference_account_uuid.clone(),
            is_retired: self.is_retired,
            note: self.note.clone(),
            attributes: self.attributes.clone(),
            transactions: Vec::new(),
        }
    }

    /// Calculate holdings (security_uuid → shares)
    pub fn holdings(&self) -> HashMap<String, i64> {
        let mut holdings: HashMap<String, i64> = HashMap::new();

        for tx in &self.transactions {
            if let Some(ref sec_uuid) = tx.security_uuid {
                *holdings.entry(sec_uuid.clone()).or_insert(0) += tx.share_effect();
            }
        }

        // Remove zero holdings
        holdings.retain(|_, &mut shares| shares > 0);
        holdings
    }
}

impl TransactionLedger for Portfolio {
    type Transaction = PortfolioTransaction;

    fn add_transaction(&mut self, transaction: PortfolioTransaction) -> Result<()> {
        self.transactions.push(transaction);
        Ok(())
    }

    fn delete_transaction(&mut self, uuid: &str) -> Result<PortfolioTransaction> {
        let pos = self
            .transactions
            .iter()
            .position(|tx| tx.uuid == uuid)
            .ok_or_else(|| LedgerError::TransactionNotFound(uuid.to_string()))?;
        Ok(self.transactions.remove(pos))
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), String::new())
    }
}
