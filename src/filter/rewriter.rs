//! Crossing transaction rewriter.
//!
//! Every transaction of the source ledger is classified by the scope of its
//! own owner and, for cross-entry legs, the scope of the counterpart's owner.
//! The outcome is one of: copy verbatim, drop, or rewrite into the single-leg
//! transaction that has the same effect on the in-scope side once the other
//! side is gone.
//!
//! | leg                                   | outcome                          |
//! |---------------------------------------|----------------------------------|
//! | owner out of scope                    | drop                             |
//! | no cross-entry                        | copy                             |
//! | cross-entry, counterpart in scope     | copy, link kept                  |
//! | cross-entry, counterpart out of scope | rewrite to deposit/removal or to |
//! |                                       | inbound/outbound delivery        |

use serde::Serialize;
use std::collections::HashSet;

use crate::error::Result;
use crate::pp::{
    AccountTransaction, AccountTransactionType, Ledger, LedgerIndex, PortfolioTransaction,
    PortfolioTransactionType, TransactionRef,
};

use super::scope::ScopePredicate;

/// Scope situation of a single transaction leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegScope {
    /// The owner (or the referenced security) is out of scope
    Excluded,
    /// In scope, not part of a cross-entry
    Standalone,
    /// In scope, paired with another leg
    Paired { counterpart_in_scope: bool },
}

/// What happens to a transaction leg in the filtered ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition<T> {
    Copy,
    Drop,
    /// Replace by a single-leg transaction of the given type
    Rewrite(T),
}

pub fn account_disposition(
    kind: AccountTransactionType,
    leg: LegScope,
) -> Disposition<AccountTransactionType> {
    match leg {
        LegScope::Excluded => Disposition::Drop,
        LegScope::Standalone | LegScope::Paired { counterpart_in_scope: true } => Disposition::Copy,
        LegScope::Paired { counterpart_in_scope: false } => {
            Disposition::Rewrite(cash_boundary_equivalent(kind))
        }
    }
}

pub fn portfolio_disposition(
    kind: PortfolioTransactionType,
    leg: LegScope,
) -> Disposition<PortfolioTransactionType> {
    match leg {
        LegScope::Excluded => Disposition::Drop,
        LegScope::Standalone | LegScope::Paired { counterpart_in_scope: true } => Disposition::Copy,
        LegScope::Paired { counterpart_in_scope: false } => {
            Disposition::Rewrite(security_boundary_equivalent(kind))
        }
    }
}

/// Cash movement across the scope boundary: money entering the in-scope
/// account is a deposit, money leaving it is a removal.
pub fn cash_boundary_equivalent(kind: AccountTransactionType) -> AccountTransactionType {
    use AccountTransactionType as T;
    match kind {
        T::Buy | T::TransferOut | T::Removal | T::InterestCharge | T::Fees | T::Taxes => T::Removal,
        T::Sell
        | T::TransferIn
        | T::Deposit
        | T::Interest
        | T::Dividends
        | T::FeesRefund
        | T::TaxRefund => T::Deposit,
    }
}

/// Security movement across the scope boundary becomes a delivery
pub fn security_boundary_equivalent(kind: PortfolioTransactionType) -> PortfolioTransactionType {
    use PortfolioTransactionType as T;
    match kind {
        T::Buy | T::TransferIn | T::DeliveryInbound => T::DeliveryInbound,
        T::Sell | T::TransferOut | T::DeliveryOutbound => T::DeliveryOutbound,
    }
}

/// Counts of rewrite outcomes for one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteStats {
    pub copied: usize,
    pub rewritten: usize,
    pub dropped: usize,
}

impl RewriteStats {
    pub fn total(&self) -> usize {
        self.copied + self.rewritten + self.dropped
    }

    fn record<T>(&mut self, disposition: &Disposition<T>) {
        match disposition {
            Disposition::Copy => self.copied += 1,
            Disposition::Drop => self.dropped += 1,
            Disposition::Rewrite(_) => self.rewritten += 1,
        }
    }
}

/// Entity membership, evaluated once per entity before any transaction
#[derive(Debug, Default)]
pub(crate) struct Membership<'a> {
    accounts: HashSet<&'a str>,
    portfolios: HashSet<&'a str>,
    securities: HashSet<&'a str>,
}

impl<'a> Membership<'a> {
    pub(crate) fn evaluate(source: &'a dyn Ledger, predicate: &dyn ScopePredicate) -> Self {
        Self {
            accounts: source
                .account_list()
                .into_iter()
                .filter(|a| predicate.includes_account(a))
                .map(|a| a.uuid.as_str())
                .collect(),
            portfolios: source
                .portfolio_list()
                .into_iter()
                .filter(|p| predicate.includes_portfolio(p))
                .map(|p| p.uuid.as_str())
                .collect(),
            securities: source
                .security_list()
                .into_iter()
                .filter(|s| predicate.includes_security(s))
                .map(|s| s.uuid.as_str())
                .collect(),
        }
    }

    pub(crate) fn has_account(&self, uuid: &str) -> bool {
        self.accounts.contains(uuid)
    }

    pub(crate) fn has_portfolio(&self, uuid: &str) -> bool {
        self.portfolios.contains(uuid)
    }

    pub(crate) fn has_security(&self, uuid: &str) -> bool {
        self.securities.contains(uuid)
    }

    /// A missing security reference never excludes a leg
    fn allows_security(&self, uuid: Option<&str>) -> bool {
        uuid.map_or(true, |uuid| self.has_security(uuid))
    }

    /// Is the leg's owner in scope? Portfolio legs also need their security.
    fn holds(&self, tx: &TransactionRef<'_>) -> bool {
        match tx {
            TransactionRef::Account { owner, .. } => self.has_account(&owner.uuid),
            TransactionRef::Portfolio { owner, transaction } => {
                self.has_portfolio(&owner.uuid)
                    && self.allows_security(transaction.security_uuid.as_deref())
            }
        }
    }
}

/// A transaction emitted into the filtered ledger, keyed by its owner's uuid
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Emitted<'a> {
    Account(&'a str, AccountTransaction),
    Portfolio(&'a str, PortfolioTransaction),
}

pub(crate) struct Rewriter<'s, 'a> {
    index: &'s LedgerIndex<'a>,
    membership: &'s Membership<'a>,
    stats: RewriteStats,
}

impl<'s, 'a> Rewriter<'s, 'a> {
    pub(crate) fn new(index: &'s LedgerIndex<'a>, membership: &'s Membership<'a>) -> Self {
        Self {
            index,
            membership,
            stats: RewriteStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> RewriteStats {
        self.stats
    }

    /// Classify one leg. The counterpart is resolved even for legs that will
    /// be dropped, so a broken cross-entry anywhere aborts the build.
    pub(crate) fn leg_scope(&self, tx: TransactionRef<'a>) -> Result<LegScope> {
        let counterpart = self.index.counterpart(tx)?;

        if !self.membership.holds(&tx) {
            return Ok(LegScope::Excluded);
        }

        Ok(match counterpart {
            Some(other) => LegScope::Paired {
                counterpart_in_scope: self.membership.holds(&other),
            },
            // income and charges of an excluded security leave with it
            None if !self.membership.allows_security(tx.security_uuid()) => LegScope::Excluded,
            None => LegScope::Standalone,
        })
    }

    /// Apply the decision table to one transaction
    pub(crate) fn rewrite(&mut self, tx: TransactionRef<'a>) -> Result<Option<Emitted<'a>>> {
        let leg = self.leg_scope(tx)?;

        let emitted = match tx {
            TransactionRef::Account { owner, transaction } => {
                let disposition = account_disposition(transaction.transaction_type, leg);
                self.stats.record(&disposition);
                self.apply_account(transaction, disposition)
                    .map(|t| Emitted::Account(owner.uuid.as_str(), t))
            }
            TransactionRef::Portfolio { owner, transaction } => {
                let disposition = portfolio_disposition(transaction.transaction_type, leg);
                self.stats.record(&disposition);
                self.apply_portfolio(transaction, disposition)
                    .map(|t| Emitted::Portfolio(owner.uuid.as_str(), t))
            }
        };
        Ok(emitted)
    }

    fn apply_account(
        &self,
        transaction: &AccountTransaction,
        disposition: Disposition<AccountTransactionType>,
    ) -> Option<AccountTransaction> {
        match disposition {
            Disposition::Drop => None,
            Disposition::Copy => {
                let mut copy = transaction.clone();
                self.detach_foreign_security(&mut copy);
                Some(copy)
            }
            Disposition::Rewrite(kind) => {
                log::debug!(
                    "Rewriting {} '{}' as {}",
                    transaction.transaction_type.as_str(),
                    transaction.uuid,
                    kind.as_str()
                );
                let mut single = transaction.clone();
                single.transaction_type = kind;
                single.cross_entry = None;
                single.units.clear();
                self.detach_foreign_security(&mut single);
                Some(single)
            }
        }
    }

    fn apply_portfolio(
        &self,
        transaction: &PortfolioTransaction,
        disposition: Disposition<PortfolioTransactionType>,
    ) -> Option<PortfolioTransaction> {
        match disposition {
            Disposition::Drop => None,
            Disposition::Copy => Some(transaction.clone()),
            Disposition::Rewrite(kind) => {
                log::debug!(
                    "Rewriting {} '{}' as {}",
                    transaction.transaction_type.as_str(),
                    transaction.uuid,
                    kind.as_str()
                );
                let mut single = transaction.clone();
                single.transaction_type = kind;
                single.cross_entry = None;
                Some(single)
            }
        }
    }

    /// A cash leg may point at a security that is out of scope (the paid-for
    /// security of a cut-off buy). The reference and share count go with it.
    fn detach_foreign_security(&self, transaction: &mut AccountTransaction) {
        if !self
            .membership
            .allows_security(transaction.security_uuid.as_deref())
        {
            transaction.security_uuid = None;
            transaction.shares = None;
        }
    }
}
