//! Per-category spending limits evaluated against the whole ledger.
//!
//! Nothing here is cached: every answer is recomputed from the current
//! transactions, so a filtered view on screen never changes what counts as
//! over budget.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::ledger::ValidationError;
use crate::models::{BudgetMap, Transaction, MAX_AMOUNT};

/// Total spent in `category`, as a positive magnitude. Saturates at
/// `Decimal::MAX` for stored ledgers too large to sum.
pub(crate) fn spent_in_category(ledger: &[Transaction], category: &str) -> Decimal {
    ledger
        .iter()
        .filter(|t| t.category == category && t.is_expense())
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.abs_amount()))
}

/// True iff a limit exists for `category` and spending strictly exceeds it.
pub(crate) fn is_over_budget(ledger: &[Transaction], budgets: &BudgetMap, category: &str) -> bool {
    budgets
        .get(category)
        .is_some_and(|limit| spent_in_category(ledger, category) > *limit)
}

pub(crate) fn over_budget_categories(
    ledger: &[Transaction],
    budgets: &BudgetMap,
) -> BTreeSet<String> {
    budgets
        .keys()
        .filter(|cat| is_over_budget(ledger, budgets, cat))
        .cloned()
        .collect()
}

/// Whether a list row should carry the over-budget highlight.
/// Income rows are never flagged.
pub(crate) fn is_flagged(txn: &Transaction, over: &BTreeSet<String>) -> bool {
    txn.is_expense() && over.contains(&txn.category)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub over: bool,
}

impl BudgetStatus {
    /// Fraction of the limit used, clamped to `[0, 1]` for progress bars.
    pub fn ratio(&self) -> f64 {
        if self.limit > Decimal::ZERO {
            self.spent
                .checked_div(self.limit)
                .and_then(|r| r.to_f64())
                .unwrap_or(1.0)
                .clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

pub(crate) fn statuses(ledger: &[Transaction], budgets: &BudgetMap) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|(category, limit)| {
            let spent = spent_in_category(ledger, category);
            BudgetStatus {
                category: category.clone(),
                limit: *limit,
                spent,
                over: spent > *limit,
            }
        })
        .collect()
}

/// One-shot notice raised when an action leaves a category over its limit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetWarning {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
}

impl std::fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You've exceeded the budget limit for {}! ({:.2} spent of {:.2})",
            self.category, self.spent, self.limit
        )
    }
}

pub(crate) fn check_and_notify(
    ledger: &[Transaction],
    budgets: &BudgetMap,
    category: &str,
) -> Option<BudgetWarning> {
    let limit = *budgets.get(category)?;
    let spent = spent_in_category(ledger, category);
    if spent > limit {
        tracing::info!(category, %spent, %limit, "category over budget");
        Some(BudgetWarning {
            category: category.to_string(),
            spent,
            limit,
        })
    } else {
        None
    }
}

/// Parse a user-entered limit. Rejects blanks, non-numbers, non-positive
/// values and anything above [`MAX_AMOUNT`].
pub(crate) fn parse_limit(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let limit = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::NonPositiveLimit(trimmed.to_string()))?;
    if limit <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveLimit(trimmed.to_string()));
    }
    if limit > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount(trimmed.to_string()));
    }
    Ok(limit)
}
