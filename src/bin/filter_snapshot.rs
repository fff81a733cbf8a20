//! Print a filtered snapshot of a ledger file
//!
//! Run with: cargo run --bin filter_snapshot -- <ledger.json> [scope]
//!
//! `scope` is either a comma-separated list of account/portfolio uuids or a
//! JSON scope object such as `{"type":"security","securityUuid":"..."}`.
//! Without it the whole ledger is selected.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use portfolio_filter::pp::common::shares;
use portfolio_filter::pp::{Client, Ledger};
use portfolio_filter::{ClientFilter, ScopeCriterion};

fn parse_scope(arg: Option<&str>) -> Result<ScopeCriterion> {
    let Some(arg) = arg else {
        return Ok(ScopeCriterion::All);
    };

    let value = if arg.trim_start().starts_with('{') {
        serde_json::from_str(arg).context("scope is not valid JSON")?
    } else {
        serde_json::Value::String(arg.to_string())
    };
    Ok(ScopeCriterion::from_configuration(&value)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .context("usage: filter_snapshot <ledger.json> [scope]")?;
    let scope = parse_scope(args.next().as_deref())?;

    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let client: Client = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a ledger file", path.display()))?;

    println!("=== Filtered Snapshot ===\n");
    println!("Source: {}", path.display());
    println!(
        "Ledger: {} accounts, {} portfolios, {} securities, {} transactions",
        client.accounts.len(),
        client.portfolios.len(),
        client.securities.len(),
        client.transaction_count()
    );
    println!("Scope:  {}\n", serde_json::to_string(&scope)?);

    let filtered = scope.filter(&client)?;

    println!("Accounts ({}):", filtered.accounts().len());
    for account in filtered.accounts() {
        println!(
            "  {:<30} {:>14.2} {}",
            account.name,
            account.balance_decimal(),
            account.currency
        );
    }

    println!("\nPortfolios ({}):", filtered.portfolios().len());
    for portfolio in filtered.portfolios() {
        println!("  {}", portfolio.name);

        let mut holdings: Vec<_> = portfolio.holdings().into_iter().collect();
        holdings.sort();
        for (security_uuid, count) in holdings {
            let name = filtered
                .find_security(&security_uuid)
                .map_or(security_uuid.as_str(), |s| s.name.as_str());
            println!("    {:<28} {:>14.6}", name, shares::to_decimal(count));
        }
    }

    let stats = filtered.stats();
    println!(
        "\nTransactions: {} copied, {} rewritten, {} dropped (of {})",
        stats.copied,
        stats.rewritten,
        stats.dropped,
        stats.total()
    );

    Ok(())
}
