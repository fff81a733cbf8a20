//! Scope-restricted, read-only snapshots of a Portfolio Performance ledger.
//!
//! [`pp`] holds the ledger model, [`filter`] builds filtered clients from it.

pub mod error;
pub mod filter;
pub mod pp;

pub use error::{LedgerError, Result};
pub use filter::{
    build_filtered_client, ClientFilter, FilteredClient, ResolvedScope, ScopeCriterion,
    ScopePredicate,
};
pub use pp::{Client, Ledger};
