use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Category name → spending limit. Limits are always positive.
pub(crate) type BudgetMap = BTreeMap<String, Decimal>;

/// Categories offered when adding an entry. The store itself accepts any label.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Salary",
    "Other",
];

pub(crate) const FALLBACK_CATEGORY: &str = "Other";

/// Find a default category by name (case-insensitive) and return its canonical spelling.
pub(crate) fn canonical_category(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    DEFAULT_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.to_lowercase() == lower)
}
