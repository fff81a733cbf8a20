//! Filtered client builder.
//!
//! Construction order:
//! 1. evaluate the scope predicate once per entity
//! 2. clone an empty shell for every in-scope security, account and portfolio
//! 3. run every source transaction, in booking order, through the rewriter
//!    and append the result to the matching shell
//! 4. seal: the builder is consumed and the shells become read-only entities

use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::pp::{Account, Ledger, LedgerIndex, Portfolio, Security, TransactionLedger};

use super::filtered::FilteredClient;
use super::read_only::{ReadOnlyAccount, ReadOnlyPortfolio, ReadOnlySecurity};
use super::rewriter::{Emitted, Membership, RewriteStats, Rewriter};
use super::scope::ScopePredicate;

/// Build the filtered client of `source` restricted to `predicate`.
///
/// Fails with [`LedgerError::InvariantViolation`] if the source ledger has a
/// broken cross-entry or a transaction booked twice; no partial result is
/// returned.
pub fn build_filtered_client(
    source: &dyn Ledger,
    predicate: &dyn ScopePredicate,
) -> Result<FilteredClient> {
    let mut builder = FilteredClientBuilder::new(source, predicate)?;
    builder.rewrite_transactions()?;
    Ok(builder.seal())
}

/// Holds the only mutable handle on the filtered entities while they are
/// being filled. `seal` consumes it.
pub(crate) struct FilteredClientBuilder<'a> {
    source: &'a dyn Ledger,
    index: LedgerIndex<'a>,
    membership: Membership<'a>,
    securities: Vec<(Security, &'a Security)>,
    accounts: Vec<(Account, &'a Account)>,
    portfolios: Vec<(Portfolio, &'a Portfolio)>,
    account_slots: HashMap<&'a str, usize>,
    portfolio_slots: HashMap<&'a str, usize>,
    stats: RewriteStats,
}

impl<'a> FilteredClientBuilder<'a> {
    pub(crate) fn new(source: &'a dyn Ledger, predicate: &dyn ScopePredicate) -> Result<Self> {
        let index = LedgerIndex::build(source).inspect_err(|e| {
            log::error!("Cannot index source ledger: {}", e);
        })?;
        let membership = Membership::evaluate(source, predicate);

        let mut builder = Self {
            source,
            index,
            membership,
            securities: Vec::new(),
            accounts: Vec::new(),
            portfolios: Vec::new(),
            account_slots: HashMap::new(),
            portfolio_slots: HashMap::new(),
            stats: RewriteStats::default(),
        };
        builder.clone_entities();
        Ok(builder)
    }

    fn clone_entities(&mut self) {
        let source = self.source;
        for security in source.security_list() {
            if self.membership.has_security(&security.uuid) {
                self.securities.push((security.clone(), security));
            }
        }

        for account in source.account_list() {
            if self.membership.has_account(&account.uuid) {
                self.account_slots.insert(&account.uuid, self.accounts.len());
                self.accounts.push((account.empty_copy(), account));
            }
        }

        for portfolio in source.portfolio_list() {
            if self.membership.has_portfolio(&portfolio.uuid) {
                let mut shell = portfolio.empty_copy();
                // settlement account only if it is part of the filtered client
                shell.reference_account_uuid = portfolio
                    .reference_account_uuid
                    .clone()
                    .filter(|uuid| self.membership.has_account(uuid));
                self.portfolio_slots.insert(&portfolio.uuid, self.portfolios.len());
                self.portfolios.push((shell, portfolio));
            }
        }
    }

    pub(crate) fn rewrite_transactions(&mut self) -> Result<()> {
        let mut rewriter = Rewriter::new(&self.index, &self.membership);
        let mut emitted = Vec::new();

        for tx in self.index.transactions() {
            match rewriter.rewrite(tx) {
                Ok(Some(result)) => emitted.push(result),
                Ok(None) => {}
                Err(e) => {
                    log::error!("Aborting filter at transaction '{}': {}", tx.uuid(), e);
                    return Err(e);
                }
            }
        }
        self.stats = rewriter.stats();

        log::debug!(
            "Rewrote {} transactions: {} copied, {} rewritten, {} dropped",
            self.stats.total(),
            self.stats.copied,
            self.stats.rewritten,
            self.stats.dropped
        );

        for result in emitted {
            self.append(result)?;
        }
        Ok(())
    }

    fn append(&mut self, emitted: Emitted<'a>) -> Result<()> {
        match emitted {
            Emitted::Account(owner, transaction) => {
                let slot = self.account_slots.get(owner).copied().ok_or_else(|| {
                    Self::missing_owner("account", owner, &transaction.uuid)
                })?;
                self.accounts[slot].0.add_transaction(transaction)
            }
            Emitted::Portfolio(owner, transaction) => {
                let slot = self.portfolio_slots.get(owner).copied().ok_or_else(|| {
                    Self::missing_owner("portfolio", owner, &transaction.uuid)
                })?;
                self.portfolios[slot].0.add_transaction(transaction)
            }
        }
    }

    fn missing_owner(kind: &str, owner: &str, transaction: &str) -> LedgerError {
        log::error!(
            "Transaction '{}' targets {} '{}' which has no filtered clone",
            transaction,
            kind,
            owner
        );
        LedgerError::invariant(format!(
            "{} '{}' of transaction '{}' was not cloned",
            kind, owner, transaction
        ))
    }

    pub(crate) fn seal(self) -> FilteredClient {
        let accounts: Vec<_> = self
            .accounts
            .into_iter()
            .map(|(shell, source)| ReadOnlyAccount::seal(shell, source))
            .collect();
        let portfolios: Vec<_> = self
            .portfolios
            .into_iter()
            .map(|(shell, source)| ReadOnlyPortfolio::seal(shell, source))
            .collect();
        let securities: Vec<_> = self
            .securities
            .into_iter()
            .map(|(clone, source)| ReadOnlySecurity::seal(clone, source))
            .collect();

        log::info!(
            "Filtered client sealed: {} accounts, {} portfolios, {} securities, {} of {} transactions kept",
            accounts.len(),
            portfolios.len(),
            securities.len(),
            self.stats.copied + self.stats.rewritten,
            self.index.len()
        );

        FilteredClient::sealed(
            self.source.base_currency().to_string(),
            securities,
            accounts,
            portfolios,
            self.source.taxonomy_list().to_vec(),
            self.stats,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures;
    use crate::filter::scope::{ResolvedScope, ScopeCriterion};

    #[test]
    fn test_shells_follow_scope() {
        let client = fixtures::ledger();
        let scope = ScopeCriterion::from_selection("acc-1,pf-2").resolve(&client);
        let builder = FilteredClientBuilder::new(&client, &scope).unwrap();

        assert_eq!(builder.accounts.len(), 1);
        assert!(builder.accounts[0].0.transactions.is_empty());
        assert_eq!(builder.portfolios.len(), 1);
        // pf-2 settles on acc-2, which is not part of the result
        assert_eq!(builder.portfolios[0].0.reference_account_uuid, None);
        assert_eq!(builder.securities.len(), 2);
    }

    #[test]
    fn test_missing_shell_is_invariant_violation() {
        let client = fixtures::ledger();
        let scope = ResolvedScope::everything(&client);
        let mut builder = FilteredClientBuilder::new(&client, &scope).unwrap();
        builder.account_slots.remove("acc-2");

        let err = builder.rewrite_transactions().unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation(_)));
        assert!(err.to_string().contains("acc-2"));
    }

    #[test]
    fn test_seal_keeps_reference_account_in_scope() {
        let client = fixtures::ledger();
        let scope = ScopeCriterion::from_selection("acc-1,pf-1").resolve(&client);
        let filtered = build_filtered_client(&client, &scope).unwrap();

        let depot = filtered.read_only_portfolio("pf-1").unwrap();
        assert_eq!(depot.reference_account_uuid.as_deref(), Some("acc-1"));
        assert_eq!(depot.source_ref().name, "Depot");
        assert_eq!(filtered.taxonomies().len(), 1);
        assert_eq!(filtered.base_currency(), "EUR");
    }
}
