//! Account model.
//!
//! Accounts represent cash/deposit accounts that hold money (not securities).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ledger::TransactionLedger;
use super::transaction::AccountTransaction;
use crate::error::{LedgerError, Result};

/// A cash/deposit account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub uuid: String,
    pub name: String,
    pub currency: String,
    /// Whether the account is retired/inactive
    pub is_retired: bool,
    pub note: Option<String>,
    /// Custom attributes
    pub attributes: HashMap<String, String>,
    /// Account transactions in booking order
    pub transactions: Vec<AccountTransaction>,
}

impl Account {
    pub fn new(uuid: String, name: String, currency: String) -> Self {
        Self {
            uuid,
            name,
            currency,
            is_retired: false,
            note: None,
            attributes: HashMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Copy of the account metadata without any transactions
    pub fn empty_copy(&self) -> Self {
        Self {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            currency: self.currency.clone(),
            is_retired: self.is_retired,
            note: self.note.clone(),
            attributes: self.attributes.clone(),
            transactions: Vec::new(),
        }
    }

    /// Calculate current balance from all transactions
    pub fn balance(&self) -> i64 {
        self.transactions.iter().map(|tx| tx.cash_effect()).sum()
    }

    /// Balance after each transaction, in booking order
    pub fn running_balances(&self) -> Vec<i64> {
        self.transactions
            .iter()
            .scan(0i64, |balance, tx| {
                *balance += tx.cash_effect();
                Some(*balance)
            })
            .collect()
    }

    /// Get balance as decimal
    pub fn balance_decimal(&self) -> f64 {
        self.balance() as f64 / super::common::AMOUNT_FACTOR as f64
    }
}

impl TransactionLedger for Account {
    type Transaction = AccountTransaction;

    fn add_transaction(&mut self, transaction: AccountTransaction) -> Result<()> {
        self.transactions.push(transaction);
        Ok(())
    }

    fn delete_transaction(&mut self, uuid: &str) -> Result<AccountTransaction> {
        let pos = self
            .transactions
            .iter()
            .position(|tx| tx.uuid == uuid)
            .ok_or_else(|| LedgerError::TransactionNotFound(uuid.to_string()))?;
        Ok(self.transactions.remove(pos))
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            String::new(),
            "EUR".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pp::{common::Money, transaction::AccountTransactionType};
    use chrono::NaiveDateTime;

    fn deposit_and_removal() -> Account {
        let mut account = Account::new("test".to_string(), "Test Account".to_string(), "EUR".to_string());

        // Deposit 1000
        account
            .add_transaction(AccountTransaction::new(
                "tx1".to_string(),
                NaiveDateTime::default(),
                AccountTransactionType::Deposit,
                Money::new(100000, "EUR"),
            ))
            .unwrap();

        // Withdraw 300
        account
            .add_transaction(AccountTransaction::new(
                "tx2".to_string(),
                NaiveDateTime::default(),
                AccountTransactionType::Removal,
                Money::new(30000, "EUR"),
            ))
            .unwrap();
        account
    }

    #[test]
    fn test_account_balance_calculation() {
        let account = deposit_and_removal();

        assert_eq!(account.balance(), 70000);
        assert_eq!(account.balance_decimal(), 700.0);
        assert_eq!(account.running_balances(), vec![100000, 70000]);
    }

    #[test]
    fn test_delete_transaction() {
        let mut account = deposit_and_removal();

        let removed = account.delete_transaction("tx2").unwrap();
        assert_eq!(removed.uuid, "tx2");
        assert_eq!(account.balance(), 100000);

        assert_eq!(
            account.delete_transaction("tx2"),
            Err(LedgerError::TransactionNotFound("tx2".to_string()))
        );
    }

    #[test]
    fn test_empty_copy_keeps_identity() {
        let account = deposit_and_removal();
        let copy = account.empty_copy();
        assert_eq!(copy.uuid, account.uuid);
        assert_eq!(copy.name, account.name);
        assert!(copy.transactions.is_empty());
    }
}
