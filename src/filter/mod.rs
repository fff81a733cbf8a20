//! Scope-restricted snapshots of a client ledger.
//!
//! A filter run takes a source [`Ledger`] and a scope and produces a
//! [`FilteredClient`]: read-only clones of the in-scope accounts, portfolios
//! and securities, holding every in-scope transaction. Transfers and buys or
//! sells whose other leg is cut off by the scope are turned into single-leg
//! transactions of the same direction, so balances and holdings of the
//! in-scope entities are unchanged.

pub mod builder;
pub mod filtered;
pub mod read_only;
pub mod rewriter;
pub mod scope;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::build_filtered_client;
pub use filtered::FilteredClient;
pub use read_only::{ReadOnlyAccount, ReadOnlyPortfolio, ReadOnlySecurity, SourceRef};
pub use rewriter::{
    account_disposition, cash_boundary_equivalent, portfolio_disposition,
    security_boundary_equivalent, Disposition, LegScope, RewriteStats,
};
pub use scope::{ResolvedScope, ScopeCriterion, ScopePredicate};

use crate::error::Result;
use crate::pp::Ledger;

/// Something that can cut a filtered client out of a ledger
pub trait ClientFilter {
    fn filter(&self, ledger: &dyn Ledger) -> Result<FilteredClient>;
}

impl ClientFilter for ScopeCriterion {
    fn filter(&self, ledger: &dyn Ledger) -> Result<FilteredClient> {
        let scope = self.resolve(ledger);
        log::debug!(
            "Resolved scope: {} accounts, {} portfolios, {} securities",
            scope.accounts.len(),
            scope.portfolios.len(),
            scope.securities.len()
        );
        build_filtered_client(ledger, &scope)
    }
}

impl ClientFilter for ResolvedScope {
    fn filter(&self, ledger: &dyn Ledger) -> Result<FilteredClient> {
        build_filtered_client(ledger, self)
    }
}
