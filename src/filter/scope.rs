//! Scope selection: which accounts, portfolios and securities a filtered
//! client contains.
//!
//! A [`ScopeCriterion`] is the configuration value handed in by view code.
//! It is resolved once against a ledger into a [`ResolvedScope`], a plain
//! set of uuids per entity kind that answers [`ScopePredicate`] queries.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LedgerError, Result};
use crate::pp::taxonomy::{VEHICLE_ACCOUNT, VEHICLE_SECURITY};
use crate::pp::{Account, Ledger, Portfolio, Security};

/// Decides per entity whether it belongs to the filtered client.
///
/// Implementations must be pure: the builder asks exactly once per entity,
/// before any transaction is looked at.
pub trait ScopePredicate {
    fn includes_account(&self, account: &Account) -> bool;

    fn includes_portfolio(&self, portfolio: &Portfolio) -> bool;

    fn includes_security(&self, security: &Security) -> bool;
}

/// Serializable description of a scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScopeCriterion {
    /// Every entity of the ledger
    #[default]
    All,
    /// Explicit accounts and portfolios, together with every security
    Entities { uuids: Vec<String> },
    /// A single security across all portfolios, without any account.
    /// Dividends and other cash income of the security are account
    /// transactions and are therefore not part of the result.
    Security { security_uuid: String },
    /// Securities and accounts assigned to a classification or its descendants,
    /// across all portfolios
    Classification {
        taxonomy_id: String,
        classification_id: String,
    },
    Union { criteria: Vec<ScopeCriterion> },
    Intersection { criteria: Vec<ScopeCriterion> },
}

impl ScopeCriterion {
    /// Parse a comma-separated selection of account/portfolio uuids.
    /// An empty selection means everything.
    pub fn from_selection(selection: &str) -> Self {
        let uuids: Vec<String> = selection
            .split(',')
            .map(str::trim)
            .filter(|uuid| !uuid.is_empty())
            .map(str::to_string)
            .collect();

        if uuids.is_empty() {
            Self::All
        } else {
            Self::Entities { uuids }
        }
    }

    /// Read a scope from a stored configuration value: either the structured
    /// form or a legacy selection string.
    pub fn from_configuration(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::All),
            serde_json::Value::String(selection) => Ok(Self::from_selection(selection)),
            serde_json::Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|e| LedgerError::InvalidConfiguration(e.to_string())),
            other => Err(LedgerError::InvalidConfiguration(format!(
                "expected a selection string or a scope object, got {}",
                other
            ))),
        }
    }

    /// Evaluate the criterion against a ledger
    pub fn resolve(&self, ledger: &dyn Ledger) -> ResolvedScope {
        match self {
            Self::All => ResolvedScope::everything(ledger),
            Self::Entities { uuids } => Self::resolve_entities(ledger, uuids),
            Self::Security { security_uuid } => {
                let mut scope = ResolvedScope::default();
                if ledger.find_security(security_uuid).is_some() {
                    scope.securities.insert(security_uuid.clone());
                    scope.portfolios = all_portfolios(ledger);
                } else {
                    log::warn!("Scope references unknown security '{}'", security_uuid);
                }
                scope
            }
            Self::Classification {
                taxonomy_id,
                classification_id,
            } => Self::resolve_classification(ledger, taxonomy_id, classification_id),
            Self::Union { criteria } => criteria
                .iter()
                .map(|c| c.resolve(ledger))
                .fold(ResolvedScope::default(), |acc, s| acc.union(&s)),
            Self::Intersection { criteria } => criteria
                .iter()
                .map(|c| c.resolve(ledger))
                .reduce(|acc, s| acc.intersection(&s))
                .unwrap_or_else(|| ResolvedScope::everything(ledger)),
        }
    }

    fn resolve_entities(ledger: &dyn Ledger, uuids: &[String]) -> ResolvedScope {
        let mut scope = ResolvedScope {
            securities: ledger.security_list().iter().map(|s| s.uuid.clone()).collect(),
            ..ResolvedScope::default()
        };

        for uuid in uuids {
            if ledger.find_account(uuid).is_some() {
                scope.accounts.insert(uuid.clone());
            } else if ledger.find_portfolio(uuid).is_some() {
                scope.portfolios.insert(uuid.clone());
            } else {
                log::warn!("Scope references unknown account or portfolio '{}'", uuid);
            }
        }
        scope
    }

    fn resolve_classification(
        ledger: &dyn Ledger,
        taxonomy_id: &str,
        classification_id: &str,
    ) -> ResolvedScope {
        let mut scope = ResolvedScope::default();

        let Some(taxonomy) = ledger.taxonomy_list().iter().find(|t| t.id == taxonomy_id) else {
            log::warn!("Scope references unknown taxonomy '{}'", taxonomy_id);
            return scope;
        };
        let Some(classification) = taxonomy.find_classification(classification_id) else {
            log::warn!(
                "Scope references unknown classification '{}' in taxonomy '{}'",
                classification_id,
                taxonomy.name
            );
            return scope;
        };

        for assignment in classification.assignments_in_subtree() {
            if assignment.weight <= 0 {
                continue;
            }
            let uuid = &assignment.vehicle_uuid;
            match assignment.vehicle_class.as_str() {
                VEHICLE_SECURITY if ledger.find_security(uuid).is_some() => {
                    scope.securities.insert(uuid.clone());
                }
                VEHICLE_ACCOUNT if ledger.find_account(uuid).is_some() => {
                    scope.accounts.insert(uuid.clone());
                }
                class => log::warn!("Ignoring assignment of {} '{}'", class, uuid),
            }
        }

        scope.portfolios = all_portfolios(ledger);
        scope
    }
}

fn all_portfolios(ledger: &dyn Ledger) -> HashSet<String> {
    ledger.portfolio_list().iter().map(|p| p.uuid.clone()).collect()
}

/// A scope evaluated against a concrete ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScope {
    pub accounts: HashSet<String>,
    pub portfolios: HashSet<String>,
    pub securities: HashSet<String>,
}

impl ResolvedScope {
    pub fn everything(ledger: &dyn Ledger) -> Self {
        Self {
            accounts: ledger.account_list().iter().map(|a| a.uuid.clone()).collect(),
            portfolios: all_portfolios(ledger),
            securities: ledger.security_list().iter().map(|s| s.uuid.clone()).collect(),
        }
    }

    pub fn union(&self, other: &ResolvedScope) -> ResolvedScope {
        ResolvedScope {
            accounts: self.accounts.union(&other.accounts).cloned().collect(),
            portfolios: self.portfolios.union(&other.portfolios).cloned().collect(),
            securities: self.securities.union(&other.securities).cloned().collect(),
        }
    }

    pub fn intersection(&self, other: &ResolvedScope) -> ResolvedScope {
        ResolvedScope {
            accounts: self.accounts.intersection(&other.accounts).cloned().collect(),
            portfolios: self.portfolios.intersection(&other.portfolios).cloned().collect(),
            securities: self.securities.intersection(&other.securities).cloned().collect(),
        }
    }

    /// Does every entity of `self` also belong to `other`?
    pub fn is_subset(&self, other: &ResolvedScope) -> bool {
        self.accounts.is_subset(&other.accounts)
            && self.portfolios.is_subset(&other.portfolios)
            && self.securities.is_subset(&other.securities)
    }
}

impl ScopePredicate for ResolvedScope {
    fn includes_account(&self, account: &Account) -> bool {
        self.accounts.contains(&account.uuid)
    }

    fn includes_portfolio(&self, portfolio: &Portfolio) -> bool {
        self.portfolios.contains(&portfolio.uuid)
    }

    fn includes_security(&self, security: &Security) -> bool {
        self.securities.contains(&security.uuid)
    }
}
