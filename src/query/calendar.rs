use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CalendarEvent {
    pub title: String,
    pub date: NaiveDate,
    pub tone: Tone,
}

/// One event per transaction, in ledger order.
pub(crate) fn calendar_events(ledger: &[Transaction]) -> Vec<CalendarEvent> {
    ledger
        .iter()
        .filter_map(|txn| {
            let date = txn.parsed_date()?;
            let tone = if txn.amount < Decimal::ZERO {
                Tone::Expense
            } else {
                Tone::Income
            };
            let sign = if tone == Tone::Expense { "-" } else { "+" };
            Some(CalendarEvent {
                title: format!("{} ({sign}{})", txn.text, txn.abs_amount()),
                date,
                tone,
            })
        })
        .collect()
}

pub(crate) fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .collect()
}
