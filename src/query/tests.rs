#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::TxnType;

fn txn(id: i64, text: &str, amount: Decimal, category: &str, date: &str) -> Transaction {
    Transaction {
        id,
        text: text.into(),
        amount,
        kind: if amount < Decimal::ZERO {
            TxnType::Expense
        } else {
            TxnType::Income
        },
        category: category.into(),
        date: date.into(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        txn(1, "Salary", dec!(5000), "Job", "2024-01-05"),
        txn(2, "Groceries", dec!(-200), "Food", "2024-01-10"),
        txn(3, "Dinner out", dec!(-100), "Food", "2024-01-11"),
        txn(4, "Bus pass", dec!(-45.50), "Transport", "2024-02-01"),
        txn(5, "Freelance", dec!(750.25), "Job", "2024-02-14"),
        txn(6, "Mystery", dec!(-10), "Other", "someday"),
    ]
}

// ── Filter ────────────────────────────────────────────────────

#[test]
fn test_empty_filter_matches_everything() {
    let ledger = sample();
    let filter = Filter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&ledger).len(), ledger.len());
}

#[test]
fn test_search_matches_text_or_category_case_insensitive() {
    let ledger = sample();
    let ids = |f: &Filter| f.apply(&ledger).iter().map(|t| t.id).collect::<Vec<_>>();

    assert_eq!(ids(&Filter::new("FOOD", "")), vec![2, 3]);
    assert_eq!(ids(&Filter::new("din", "")), vec![3]);
    assert_eq!(ids(&Filter::new("job", "")), vec![1, 5]);
    assert!(ids(&Filter::new("rent", "")).is_empty());
}

#[test]
fn test_date_filter_is_exact() {
    let ledger = sample();
    let view = Filter::new("", "2024-01-10").apply(&ledger);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].text, "Groceries");
    assert!(Filter::new("", "2024-01").apply(&ledger).is_empty());
}

#[test]
fn test_search_and_date_are_anded() {
    let ledger = sample();
    assert!(Filter::new("salary", "2024-01-10").apply(&ledger).is_empty());
    assert_eq!(Filter::new("food", "2024-01-11").apply(&ledger).len(), 1);
}

#[test]
fn test_filter_preserves_order_and_is_idempotent() {
    let ledger = sample();
    for filter in [
        Filter::default(),
        Filter::new("o", ""),
        Filter::new("", "2024-02-01"),
        Filter::new("j", "2024-02-14"),
    ] {
        let once = filter.apply(&ledger);
        let twice = filter.apply(once.iter().copied());
        assert_eq!(once, twice);
        let positions: Vec<usize> = once
            .iter()
            .map(|t| ledger.iter().position(|l| l.id == t.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

// ── aggregate ─────────────────────────────────────────────────

#[test]
fn test_aggregate_example() {
    let ledger = vec![
        txn(1, "Salary", dec!(5000), "Job", "2024-01-05"),
        txn(2, "Groceries", dec!(-200), "Food", "2024-01-10"),
    ];
    let totals = aggregate(&ledger);
    assert_eq!(
        totals,
        Totals {
            net: dec!(4800),
            income: dec!(5000),
            expense: dec!(200),
        }
    );
}

#[test]
fn test_aggregate_net_is_income_minus_expense() {
    let ledger = sample();
    for n in 0..=ledger.len() {
        let totals = aggregate(&ledger[..n]);
        assert_eq!(totals.net, totals.income - totals.expense);
        assert!(totals.expense >= Decimal::ZERO);
    }
}

#[test]
fn test_aggregate_over_filtered_view() {
    let ledger = sample();
    let view = Filter::new("food", "").apply(&ledger);
    let totals = aggregate(view.iter().copied());
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expense, dec!(300));
    assert_eq!(totals.net, dec!(-300));
}

#[test]
fn test_aggregate_empty() {
    assert_eq!(aggregate(&Vec::<Transaction>::new()), Totals::default());
}

#[test]
fn test_rounding_only_for_display() {
    let ledger = vec![
        txn(1, "a", dec!(0.333), "Job", "2024-01-01"),
        txn(2, "b", dec!(0.333), "Job", "2024-01-01"),
    ];
    let totals = aggregate(&ledger);
    assert_eq!(totals.income, dec!(0.666));
    assert_eq!(totals.rounded().income, dec!(0.67));
}

// ── monthly buckets ───────────────────────────────────────────

#[test]
fn test_monthly_buckets() {
    let buckets = monthly_buckets(&sample());
    let keys: Vec<&str> = buckets.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["2024-01", "2024-02"]);
    assert_eq!(
        buckets["2024-01"],
        MonthBucket {
            income: dec!(5000),
            expense: dec!(300),
        }
    );
    assert_eq!(
        buckets["2024-02"],
        MonthBucket {
            income: dec!(750.25),
            expense: dec!(45.50),
        }
    );
}

#[test]
fn test_monthly_buckets_sort_across_years() {
    let ledger = vec![
        txn(1, "a", dec!(1), "Job", "2024-01-01"),
        txn(2, "b", dec!(-1), "Food", "2023-12-31"),
    ];
    let keys: Vec<String> = monthly_buckets(&ledger).into_keys().collect();
    assert_eq!(keys, vec!["2023-12".to_string(), "2024-01".to_string()]);
}

#[test]
fn test_month_label() {
    assert_eq!(month_label("2024-01"), "Jan 2024");
    assert_eq!(month_label("2023-12"), "Dec 2023");
    assert_eq!(month_label("garbage"), "garbage");
}

// ── calendar events ───────────────────────────────────────────

#[test]
fn test_calendar_events() {
    let events = calendar_events(&sample());
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].title, "Salary (+5000)");
    assert_eq!(events[0].tone, Tone::Income);
    assert_eq!(events[1].title, "Groceries (-200)");
    assert_eq!(events[1].tone, Tone::Expense);
    assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
}

#[test]
fn test_events_in_month() {
    let events = calendar_events(&sample());
    let jan = events_in_month(&events, 2024, 1);
    assert_eq!(jan.len(), 3);
    assert!(events_in_month(&events, 2023, 1).is_empty());
}
