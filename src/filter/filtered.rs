//! The filtered client: an immutable, scope-restricted ledger.

use std::ops::Deref;

use crate::pp::{Account, Ledger, Portfolio, Security, Taxonomy};

use super::read_only::{ReadOnlyAccount, ReadOnlyPortfolio, ReadOnlySecurity};
use super::rewriter::RewriteStats;

/// Client-shaped result of a filter run.
///
/// Owns read-only clones of every in-scope entity. Nothing in it can be
/// changed after construction, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct FilteredClient {
    base_currency: String,
    securities: Vec<ReadOnlySecurity>,
    accounts: Vec<ReadOnlyAccount>,
    portfolios: Vec<ReadOnlyPortfolio>,
    taxonomies: Vec<Taxonomy>,
    stats: RewriteStats,
}

impl FilteredClient {
    pub(crate) fn sealed(
        base_currency: String,
        securities: Vec<ReadOnlySecurity>,
        accounts: Vec<ReadOnlyAccount>,
        portfolios: Vec<ReadOnlyPortfolio>,
        taxonomies: Vec<Taxonomy>,
        stats: RewriteStats,
    ) -> Self {
        Self {
            base_currency,
            securities,
            accounts,
            portfolios,
            taxonomies,
            stats,
        }
    }

    pub fn accounts(&self) -> &[ReadOnlyAccount] {
        &self.accounts
    }

    pub fn portfolios(&self) -> &[ReadOnlyPortfolio] {
        &self.portfolios
    }

    pub fn securities(&self) -> &[ReadOnlySecurity] {
        &self.securities
    }

    pub fn taxonomies(&self) -> &[Taxonomy] {
        &self.taxonomies
    }

    /// How the source transactions were treated while building this client
    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    pub fn read_only_account(&self, uuid: &str) -> Option<&ReadOnlyAccount> {
        self.accounts.iter().find(|a| a.uuid == uuid)
    }

    pub fn read_only_portfolio(&self, uuid: &str) -> Option<&ReadOnlyPortfolio> {
        self.portfolios.iter().find(|p| p.uuid == uuid)
    }

    pub fn read_only_security(&self, uuid: &str) -> Option<&ReadOnlySecurity> {
        self.securities.iter().find(|s| s.uuid == uuid)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.portfolios.is_empty() && self.securities.is_empty()
    }
}

/// Two filtered clients are equal when they hold the same ledger; build
/// statistics are not compared.
impl PartialEq for FilteredClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_currency == other.base_currency
            && self.securities == other.securities
            && self.accounts == other.accounts
            && self.portfolios == other.portfolios
            && self.taxonomies == other.taxonomies
    }
}

impl Ledger for FilteredClient {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn account_list(&self) -> Vec<&Account> {
        self.accounts.iter().map(Deref::deref).collect()
    }

    fn portfolio_list(&self) -> Vec<&Portfolio> {
        self.portfolios.iter().map(Deref::deref).collect()
    }

    fn security_list(&self) -> Vec<&Security> {
        self.securities.iter().map(Deref::deref).collect()
    }

    fn taxonomy_list(&self) -> &[Taxonomy] {
        &self.taxonomies
    }
}
