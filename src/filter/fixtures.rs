//! Shared sample ledger for the filter tests.
//!
//! Two accounts, two portfolios, two securities:
//!
//! ```text
//! 01-02  acc-1  DEPOSIT        10,000.00
//! 01-03  acc-2  DEPOSIT         5,000.00
//! 01-10  pf-1   BUY sec-a 10   1,500.00   <-> acc-1 BUY
//! 01-15  acc-1  TRANSFER_OUT   2,000.00   <-> acc-2 TRANSFER_IN
//! 02-01  acc-1  DIVIDENDS sec-a    50.00
//! 02-05  pf-2   BUY sec-b 5      500.00   <-> acc-1 BUY   (pf-2 settles on acc-2)
//! 02-10  pf-1   TRANSFER_OUT sec-a 4      <-> pf-2 TRANSFER_IN
//! 03-01  pf-1   SELL sec-a 2     400.00   <-> acc-1 SELL
//! 03-05  acc-2  FEES                5.00
//! 03-10  acc-1  INTEREST           12.00
//! 03-12  acc-2  DIVIDENDS sec-b     8.00
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::pp::{
    Account, AccountTransaction, AccountTransactionType, Classification,
    ClassificationAssignment, Client, CrossEntry, Money, Portfolio, PortfolioTransaction,
    PortfolioTransactionType, Security, Taxonomy, TransactionUnit, SHARES_FACTOR,
};

pub(crate) fn at(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn cash(uuid: &str, date: NaiveDateTime, kind: AccountTransactionType, cents: i64) -> AccountTransaction {
    AccountTransaction::new(uuid.to_string(), date, kind, Money::new(cents, "EUR"))
}

fn shares(
    uuid: &str,
    date: NaiveDateTime,
    kind: PortfolioTransactionType,
    security: &str,
    count: i64,
    cents: i64,
) -> PortfolioTransaction {
    let mut tx = PortfolioTransaction::new(
        uuid.to_string(),
        date,
        kind,
        Money::new(cents, "EUR"),
        count * SHARES_FACTOR,
    );
    tx.security_uuid = Some(security.to_string());
    tx
}

fn link_account_leg(tx: &mut AccountTransaction, entry: &CrossEntry, security: Option<&str>) {
    tx.cross_entry = Some(entry.clone());
    tx.security_uuid = security.map(str::to_string);
}

pub(crate) fn ledger() -> Client {
    use AccountTransactionType as Cash;
    use PortfolioTransactionType as Shares;

    let mut client = Client::new("EUR");
    client.securities.push(Security::new("sec-a".to_string(), "Alpha AG".to_string(), "EUR".to_string()));
    client.securities.push(Security::new("sec-b".to_string(), "Beta Inc".to_string(), "EUR".to_string()));

    let mut acc1 = Account::new("acc-1".to_string(), "Girokonto".to_string(), "EUR".to_string());
    let mut acc2 = Account::new("acc-2".to_string(), "Tagesgeld".to_string(), "EUR".to_string());
    let mut pf1 = Portfolio::new("pf-1".to_string(), "Depot".to_string());
    pf1.reference_account_uuid = Some("acc-1".to_string());
    let mut pf2 = Portfolio::new("pf-2".to_string(), "Second Depot".to_string());
    pf2.reference_account_uuid = Some("acc-2".to_string());

    acc1.transactions.push(cash("d1", at(1, 2), Cash::Deposit, 1_000_000));
    acc2.transactions.push(cash("d2", at(1, 3), Cash::Deposit, 500_000));

    // buy sec-a
    let buy_a = CrossEntry::buy_sell("p-buy-a".to_string(), "a-buy-a".to_string());
    let mut p_buy_a = shares("p-buy-a", at(1, 10), Shares::Buy, "sec-a", 10, 150_000);
    p_buy_a.units.push(TransactionUnit::fee(Money::new(1_000, "EUR")));
    p_buy_a.cross_entry = Some(buy_a.clone());
    pf1.transactions.push(p_buy_a);
    let mut a_buy_a = cash("a-buy-a", at(1, 10), Cash::Buy, 150_000);
    a_buy_a.units.push(TransactionUnit::fee(Money::new(1_000, "EUR")));
    link_account_leg(&mut a_buy_a, &buy_a, Some("sec-a"));
    acc1.transactions.push(a_buy_a);

    // cash transfer acc-1 -> acc-2
    let transfer = CrossEntry::account_transfer("a-tout".to_string(), "a-tin".to_string());
    let mut a_tout = cash("a-tout", at(1, 15), Cash::TransferOut, 200_000);
    link_account_leg(&mut a_tout, &transfer, None);
    acc1.transactions.push(a_tout);
    let mut a_tin = cash("a-tin", at(1, 15), Cash::TransferIn, 200_000);
    link_account_leg(&mut a_tin, &transfer, None);
    acc2.transactions.push(a_tin);

    let mut div_a = cash("a-div-a", at(2, 1), Cash::Dividends, 5_000);
    div_a.security_uuid = Some("sec-a".to_string());
    acc1.transactions.push(div_a);

    // buy sec-b into pf-2, paid from acc-1
    let buy_b = CrossEntry::buy_sell("p-buy-b".to_string(), "a-buy-b".to_string());
    let mut p_buy_b = shares("p-buy-b", at(2, 5), Shares::Buy, "sec-b", 5, 50_000);
    p_buy_b.cross_entry = Some(buy_b.clone());
    pf2.transactions.push(p_buy_b);
    let mut a_buy_b = cash("a-buy-b", at(2, 5), Cash::Buy, 50_000);
    link_account_leg(&mut a_buy_b, &buy_b, Some("sec-b"));
    acc1.transactions.push(a_buy_b);

    // security transfer pf-1 -> pf-2
    let move_a = CrossEntry::portfolio_transfer("p-tout".to_string(), "p-tin".to_string());
    let mut p_tout = shares("p-tout", at(2, 10), Shares::TransferOut, "sec-a", 4, 60_000);
    p_tout.cross_entry = Some(move_a.clone());
    pf1.transactions.push(p_tout);
    let mut p_tin = shares("p-tin", at(2, 10), Shares::TransferIn, "sec-a", 4, 60_000);
    p_tin.cross_entry = Some(move_a);
    pf2.transactions.push(p_tin);

    // sell sec-a
    let sell_a = CrossEntry::buy_sell("p-sell-a".to_string(), "a-sell-a".to_string());
    let mut p_sell_a = shares("p-sell-a", at(3, 1), Shares::Sell, "sec-a", 2, 40_000);
    p_sell_a.cross_entry = Some(sell_a.clone());
    pf1.transactions.push(p_sell_a);
    let mut a_sell_a = cash("a-sell-a", at(3, 1), Cash::Sell, 40_000);
    link_account_leg(&mut a_sell_a, &sell_a, Some("sec-a"));
    acc1.transactions.push(a_sell_a);

    acc2.transactions.push(cash("a-fee", at(3, 5), Cash::Fees, 500));
    acc1.transactions.push(cash("a-int", at(3, 10), Cash::Interest, 1_200));
    let mut div_b = cash("a-div-b", at(3, 12), Cash::Dividends, 800);
    div_b.security_uuid = Some("sec-b".to_string());
    acc2.transactions.push(div_b);

    client.accounts.push(acc1);
    client.accounts.push(acc2);
    client.portfolios.push(pf1);
    client.portfolios.push(pf2);
    client.taxonomies.push(asset_classes());
    client
}

/// "Equities" holds sec-a, "Cash" holds acc-2; sec-b is unclassified
fn asset_classes() -> Taxonomy {
    let mut taxonomy = Taxonomy::new("tax-assets".to_string(), "Asset Classes".to_string());
    let mut root = Classification::new("c-root".to_string(), "Asset Classes".to_string());

    let mut equities = Classification::new("c-eq".to_string(), "Equities".to_string());
    equities
        .assignments
        .push(ClassificationAssignment::security("sec-a".to_string(), 10000));

    let mut cash = Classification::new("c-cash".to_string(), "Cash".to_string());
    cash.assignments
        .push(ClassificationAssignment::account("acc-2".to_string(), 10000));
    // zero weight does not count as membership
    cash.assignments
        .push(ClassificationAssignment::account("acc-1".to_string(), 0));

    root.children.push(equities);
    root.children.push(cash);
    taxonomy.root = Some(root);
    taxonomy
}
