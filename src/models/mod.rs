mod budget;
mod theme;
mod transaction;

pub(crate) use budget::{canonical_category, BudgetMap, DEFAULT_CATEGORIES, FALLBACK_CATEGORY};
pub(crate) use theme::ThemePreference;
pub(crate) use transaction::{Transaction, TxnType, MAX_AMOUNT};
