use rust_decimal::Decimal;

use super::NewTransaction;
use crate::budget::BudgetWarning;
use crate::models::Transaction;

/// A user action handed from a presentation layer to the store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Intent {
    AddTransaction(NewTransaction),
    DeleteTransaction(i64),
    ClearAll,
    SetBudget { category: String, amount: String },
    RemoveBudget(String),
}

impl Intent {
    /// Prompt shown before the intent runs, for intents that need a yes/no gate.
    pub(crate) fn confirmation_prompt(&self) -> Option<String> {
        match self {
            Self::ClearAll => Some("Are you sure you want to clear all transactions?".into()),
            Self::RemoveBudget(category) => Some(format!("Remove budget for {category}?")),
            _ => None,
        }
    }
}

/// What the store did in response to an [`Intent`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    Added {
        transaction: Transaction,
        over_budget: Option<BudgetWarning>,
    },
    Deleted(Option<Transaction>),
    Cleared,
    BudgetSet {
        category: String,
        limit: Decimal,
        over_budget: Option<BudgetWarning>,
    },
    BudgetRemoved(Option<Decimal>),
    /// The confirmation gate said no; nothing changed.
    Declined,
}

/// Blocking yes/no decision taken before a destructive operation.
pub(crate) trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A decision already taken, e.g. by a TUI confirm prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Answer {
    Yes,
    No,
}

impl ConfirmGate for Answer {
    fn confirm(&mut self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = ?self, "confirmation");
        *self == Answer::Yes
    }
}
