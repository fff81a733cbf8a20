//! Link table over all transactions of a ledger.
//!
//! Transactions only carry a [`CrossEntry`] key. The index maps every
//! transaction uuid to its owner so a cross-entry can be resolved to the
//! other leg without the legs referencing each other.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use super::account::Account;
use super::ledger::Ledger;
use super::portfolio::Portfolio;
use super::transaction::{AccountTransaction, CrossEntry, PortfolioTransaction};
use crate::error::{LedgerError, Result};

/// A transaction together with the entity owning it
#[derive(Debug, Clone, Copy)]
pub enum TransactionRef<'a> {
    Account {
        owner: &'a Account,
        transaction: &'a AccountTransaction,
    },
    Portfolio {
        owner: &'a Portfolio,
        transaction: &'a PortfolioTransaction,
    },
}

impl<'a> TransactionRef<'a> {
    pub fn uuid(&self) -> &'a str {
        match self {
            Self::Account { transaction, .. } => &transaction.uuid,
            Self::Portfolio { transaction, .. } => &transaction.uuid,
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        match self {
            Self::Account { transaction, .. } => transaction.date,
            Self::Portfolio { transaction, .. } => transaction.date,
        }
    }

    pub fn owner_uuid(&self) -> &'a str {
        match self {
            Self::Account { owner, .. } => &owner.uuid,
            Self::Portfolio { owner, .. } => &owner.uuid,
        }
    }

    pub fn security_uuid(&self) -> Option<&'a str> {
        match self {
            Self::Account { transaction, .. } => transaction.security_uuid.as_deref(),
            Self::Portfolio { transaction, .. } => transaction.security_uuid.as_deref(),
        }
    }

    pub fn cross_entry(&self) -> Option<&'a CrossEntry> {
        match self {
            Self::Account { transaction, .. } => transaction.cross_entry.as_ref(),
            Self::Portfolio { transaction, .. } => transaction.cross_entry.as_ref(),
        }
    }
}

/// Transaction uuid → owner lookup, built once per ledger
#[derive(Debug)]
pub struct LedgerIndex<'a> {
    by_uuid: HashMap<&'a str, TransactionRef<'a>>,
    /// Every transaction in insertion order: accounts first, then portfolios
    sequence: Vec<TransactionRef<'a>>,
}

impl<'a> LedgerIndex<'a> {
    pub fn build(ledger: &'a dyn Ledger) -> Result<Self> {
        let mut sequence = Vec::with_capacity(ledger.transaction_count());

        for owner in ledger.account_list() {
            sequence.extend(
                owner
                    .transactions
                    .iter()
                    .map(|transaction| TransactionRef::Account { owner, transaction }),
            );
        }
        for owner in ledger.portfolio_list() {
            sequence.extend(
                owner
                    .transactions
                    .iter()
                    .map(|transaction| TransactionRef::Portfolio { owner, transaction }),
            );
        }

        let mut by_uuid = HashMap::with_capacity(sequence.len());
        for tx in &sequence {
            if let Some(previous) = by_uuid.insert(tx.uuid(), *tx) {
                return Err(LedgerError::invariant(format!(
                    "transaction '{}' is booked on both '{}' and '{}'",
                    tx.uuid(),
                    previous.owner_uuid(),
                    tx.owner_uuid()
                )));
            }
        }

        Ok(Self { by_uuid, sequence })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn get(&self, uuid: &str) -> Option<TransactionRef<'a>> {
        self.by_uuid.get(uuid).copied()
    }

    /// Resolve the other leg of a cross-entry transaction.
    ///
    /// Returns `Ok(None)` for transactions without a cross-entry. Fails if the
    /// key does not name this transaction, the other leg is missing, or the
    /// other leg does not carry the same key back.
    pub fn counterpart(&self, tx: TransactionRef<'a>) -> Result<Option<TransactionRef<'a>>> {
        let Some(entry) = tx.cross_entry() else {
            return Ok(None);
        };

        let other_uuid = entry
            .counterpart_of(tx.uuid())
            .filter(|other| *other != tx.uuid())
            .ok_or_else(|| {
                LedgerError::invariant(format!(
                    "cross-entry {} -> {} does not link transaction '{}'",
                    entry.source_uuid,
                    entry.target_uuid,
                    tx.uuid()
                ))
            })?;

        let other = self.get(other_uuid).ok_or_else(|| {
            LedgerError::invariant(format!(
                "cross-entry counterpart '{}' of transaction '{}' does not exist",
                other_uuid,
                tx.uuid()
            ))
        })?;

        if other.cross_entry() != Some(entry) {
            return Err(LedgerError::invariant(format!(
                "transaction '{}' does not link back to '{}'",
                other_uuid,
                tx.uuid()
            )));
        }

        Ok(Some(other))
    }

    /// All transactions in booking order: accounts first, then portfolios,
    /// each owner's transactions as stored
    pub fn transactions(&self) -> impl Iterator<Item = TransactionRef<'a>> + '_ {
        self.sequence.iter().copied()
    }
}
