//! Read-only counterparts of accounts, portfolios and securities.
//!
//! Each wrapper owns its entity and derefs to it, so every read method of the
//! plain entity is available. There is no `DerefMut`, and the mutation
//! capabilities ([`TransactionLedger`], [`PriceHistory`]) are implemented by
//! refusing the call. Only the filtered client builder can create them.

use serde::Serialize;
use std::ops::Deref;

use crate::error::{LedgerError, Result};
use crate::pp::{
    Account, AccountTransaction, Ledger, Portfolio, PortfolioTransaction, PriceEntry,
    PriceHistory, Security, TransactionLedger,
};

/// Provenance link from a filtered entity back to the entity it was cloned from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub uuid: String,
    pub name: String,
}

impl SourceRef {
    fn of(uuid: &str, name: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: name.to_string(),
        }
    }
}

/// Account of a filtered client
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlyAccount {
    account: Account,
    source: SourceRef,
}

impl ReadOnlyAccount {
    pub(crate) fn seal(account: Account, source: &Account) -> Self {
        Self {
            source: SourceRef::of(&source.uuid, &source.name),
            account,
        }
    }

    pub fn source_ref(&self) -> &SourceRef {
        &self.source
    }

    /// Look up the originating account in the ledger that was filtered
    pub fn source<'l>(&self, ledger: &'l dyn Ledger) -> Option<&'l Account> {
        ledger.find_account(&self.source.uuid)
    }
}

impl Deref for ReadOnlyAccount {
    type Target = Account;

    fn deref(&self) -> &Account {
        &self.account
    }
}

impl TransactionLedger for ReadOnlyAccount {
    type Transaction = AccountTransaction;

    fn add_transaction(&mut self, _transaction: AccountTransaction) -> Result<()> {
        Err(LedgerError::unsupported("account", "add a transaction"))
    }

    fn delete_transaction(&mut self, _uuid: &str) -> Result<AccountTransaction> {
        Err(LedgerError::unsupported("account", "delete a transaction"))
    }
}

/// Portfolio of a filtered client
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlyPortfolio {
    portfolio: Portfolio,
    source: SourceRef,
}

impl ReadOnlyPortfolio {
    pub(crate) fn seal(portfolio: Portfolio, source: &Portfolio) -> Self {
        Self {
            source: SourceRef::of(&source.uuid, &source.name),
            portfolio,
        }
    }

    pub fn source_ref(&self) -> &SourceRef {
        &self.source
    }

    pub fn source<'l>(&self, ledger: &'l dyn Ledger) -> Option<&'l Portfolio> {
        ledger.find_portfolio(&self.source.uuid)
    }
}

impl Deref for ReadOnlyPortfolio {
    type Target = Portfolio;

    fn deref(&self) -> &Portfolio {
        &self.portfolio
    }
}

impl TransactionLedger for ReadOnlyPortfolio {
    type Transaction = PortfolioTransaction;

    fn add_transaction(&mut self, _transaction: PortfolioTransaction) -> Result<()> {
        Err(LedgerError::unsupported("portfolio", "add a transaction"))
    }

    fn delete_transaction(&mut self, _uuid: &str) -> Result<PortfolioTransaction> {
        Err(LedgerError::unsupported("portfolio", "delete a transaction"))
    }
}

/// Security of a filtered client
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOnlySecurity {
    security: Security,
    source: SourceRef,
}

impl ReadOnlySecurity {
    pub(crate) fn seal(security: Security, source: &Security) -> Self {
        Self {
            source: SourceRef::of(&source.uuid, &source.name),
            security,
        }
    }

    pub fn source_ref(&self) -> &SourceRef {
        &self.source
    }

    pub fn source<'l>(&self, ledger: &'l dyn Ledger) -> Option<&'l Security> {
        ledger.find_security(&self.source.uuid)
    }
}

impl Deref for ReadOnlySecurity {
    type Target = Security;

    fn deref(&self) -> &Security {
        &self.security
    }
}

impl PriceHistory for ReadOnlySecurity {
    fn add_price(&mut self, _entry: PriceEntry) -> Result<()> {
        Err(LedgerError::unsupported("security", "add a price"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures;
    use crate::pp::{AccountTransactionType, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_read_api_is_available() {
        let client = fixtures::ledger();
        let source = &client.accounts[0];
        let account = ReadOnlyAccount::seal(source.clone(), source);

        assert_eq!(account.uuid, "acc-1");
        assert_eq!(account.balance(), source.balance());
        assert_eq!(account.transactions.len(), source.transactions.len());
        assert_eq!(account.source_ref().name, "Girokonto");
        assert_eq!(account.source(&client), Some(source));
    }

    #[test]
    fn test_account_mutation_is_rejected() {
        let client = fixtures::ledger();
        let source = &client.accounts[0];
        let mut account = ReadOnlyAccount::seal(source.empty_copy(), source);
        let before = account.clone();

        let deposit = AccountTransaction::new(
            "new".to_string(),
            fixtures::at(4, 1),
            AccountTransactionType::Deposit,
            Money::new(100, "EUR"),
        );
        assert_eq!(
            account.add_transaction(deposit),
            Err(LedgerError::UnsupportedOperation {
                entity: "account",
                operation: "add a transaction"
            })
        );
        assert!(matches!(
            account.delete_transaction("d1"),
            Err(LedgerError::UnsupportedOperation { .. })
        ));
        assert_eq!(account, before);
    }

    #[test]
    fn test_portfolio_and_security_mutation_is_rejected() {
        let client = fixtures::ledger();
        let source = &client.portfolios[0];
        let mut portfolio = ReadOnlyPortfolio::seal(source.clone(), source);
        assert!(matches!(
            portfolio.delete_transaction("p-buy-a"),
            Err(LedgerError::UnsupportedOperation { entity: "portfolio", .. })
        ));
        assert_eq!(portfolio.transactions.len(), 3);
        assert_eq!(portfolio.source(&client).map(|p| p.name.as_str()), Some("Depot"));

        let source = &client.securities[0];
        let mut security = ReadOnlySecurity::seal(source.clone(), source);
        let price = PriceEntry::new(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), 1);
        assert!(matches!(
            security.add_price(price),
            Err(LedgerError::UnsupportedOperation { entity: "security", .. })
        ));
        assert!(security.prices.is_empty());
    }
}
