use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    pub income: Decimal,
    /// Positive magnitude.
    pub expense: Decimal,
}

/// Group the ledger by "YYYY-MM" of each entry's date. Entries whose date
/// does not parse are skipped.
pub(crate) fn monthly_buckets(ledger: &[Transaction]) -> BTreeMap<String, MonthBucket> {
    let mut buckets: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for txn in ledger {
        let Some(date) = txn.parsed_date() else {
            tracing::debug!(id = txn.id, date = %txn.date, "skipping unparseable date");
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let bucket = buckets.entry(key).or_default();
        if txn.amount < Decimal::ZERO {
            bucket.expense = bucket.expense.saturating_add(txn.amount.abs());
        } else {
            bucket.income = bucket.income.saturating_add(txn.amount);
        }
    }
    buckets
}

/// "2024-01" → "Jan 2024". Keys that do not parse come back unchanged.
pub(crate) fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}
