//! Client model - the root of a ledger.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::ledger::Ledger;
use super::portfolio::Portfolio;
use super::security::Security;
use super::taxonomy::Taxonomy;

/// The root client object owning every account, portfolio and security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Base currency (default: EUR)
    pub base_currency: String,
    /// All securities defined in the ledger
    pub securities: Vec<Security>,
    /// All cash accounts
    pub accounts: Vec<Account>,
    /// All portfolios (depots)
    pub portfolios: Vec<Portfolio>,
    /// Taxonomies for classification
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
}

impl Client {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            securities: Vec::new(),
            accounts: Vec::new(),
            portfolios: Vec::new(),
            taxonomies: Vec::new(),
        }
    }
}

impl Ledger for Client {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn account_list(&self) -> Vec<&Account> {
        self.accounts.iter().collect()
    }

    fn portfolio_list(&self) -> Vec<&Portfolio> {
        self.portfolios.iter().collect()
    }

    fn security_list(&self) -> Vec<&Security> {
        self.securities.iter().collect()
    }

    fn taxonomy_list(&self) -> &[Taxonomy] {
        &self.taxonomies
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new("EUR")
    }
}
