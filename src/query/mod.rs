//! Derived, read-only views over the ledger.

mod calendar;
mod chart;

use rust_decimal::Decimal;

use crate::models::Transaction;

pub(crate) use calendar::{calendar_events, events_in_month, CalendarEvent, Tone};
pub(crate) use chart::{month_label, monthly_buckets, MonthBucket};

/// Free-text search plus an exact-date filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Filter {
    pub search: String,
    pub date: String,
}

impl Filter {
    pub(crate) fn new(search: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            date: date.into(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.search.is_empty() && self.date.is_empty()
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        let search_ok = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            txn.text.to_lowercase().contains(&needle)
                || txn.category.to_lowercase().contains(&needle)
        };
        let date_ok = self.date.is_empty() || txn.date == self.date;
        search_ok && date_ok
    }

    /// Matching transactions in ledger order.
    pub(crate) fn apply<'a, I>(&self, ledger: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        ledger.into_iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub net: Decimal,
    pub income: Decimal,
    /// Positive magnitude of all expenses.
    pub expense: Decimal,
}

impl Totals {
    /// Two-decimal display values, rounded only here.
    pub(crate) fn rounded(&self) -> Self {
        Self {
            net: self.net.round_dp(2),
            income: self.income.round_dp(2),
            expense: self.expense.round_dp(2),
        }
    }
}

pub(crate) fn aggregate<'a, I>(view: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for txn in view {
        totals.net = totals.net.saturating_add(txn.amount);
        if txn.amount > Decimal::ZERO {
            totals.income = totals.income.saturating_add(txn.amount);
        } else if txn.amount < Decimal::ZERO {
            totals.expense = totals.expense.saturating_add(txn.amount.abs());
        }
    }
    totals
}

#[cfg(test)]
mod tests;
