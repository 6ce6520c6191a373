//! The single stateful store behind every screen and command.
//!
//! A [`Ledger`] owns the ordered transactions and the category budget map,
//! loaded once from [`Storage`] at startup. Every mutation rewrites both
//! payloads before returning.

mod error;
mod intent;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::budget::{self, BudgetWarning};
use crate::db::{Storage, KEY_BUDGETS, KEY_THEME, KEY_TRANSACTIONS};
use crate::models::{
    canonical_category, BudgetMap, ThemePreference, Transaction, TxnType, FALLBACK_CATEGORY,
    MAX_AMOUNT,
};

pub(crate) use error::{LedgerError, Result, ValidationError};
pub(crate) use intent::{Answer, ConfirmGate, Intent, Outcome};

/// Raw user input for a new entry. `amount` is the unsigned magnitude as typed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub text: String,
    pub amount: String,
    pub kind: TxnType,
    pub category: String,
    pub date: String,
}

/// Result of an operation guarded by a [`ConfirmGate`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Gated<T> {
    Declined,
    Done(T),
}

pub(crate) struct Ledger {
    storage: Box<dyn Storage>,
    transactions: Vec<Transaction>,
    budgets: BudgetMap,
    theme: ThemePreference,
}

impl Ledger {
    /// Build the store from whatever is persisted. Absent or unreadable
    /// payloads become empty collections.
    pub(crate) fn load(storage: Box<dyn Storage>) -> Self {
        let transactions: Vec<Transaction> = read_payload(storage.as_ref(), KEY_TRANSACTIONS);
        let budgets: BudgetMap = read_payload(storage.as_ref(), KEY_BUDGETS);
        let theme = read_theme(storage.as_ref());
        tracing::info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            %theme,
            "ledger loaded"
        );
        Self {
            storage,
            transactions,
            budgets,
            theme,
        }
    }

    /// Write the transactions and budgets payloads together.
    pub(crate) fn persist(&mut self) -> Result<()> {
        let transactions = serde_json::to_string(&self.transactions)?;
        let budgets = serde_json::to_string(&self.budgets)?;
        self.storage.set_many(&[
            (KEY_TRANSACTIONS, transactions),
            (KEY_BUDGETS, budgets),
        ])?;
        tracing::debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "ledger persisted"
        );
        Ok(())
    }

    // ── Read API ──────────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budgets(&self) -> &BudgetMap {
        &self.budgets
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn theme(&self) -> ThemePreference {
        self.theme
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        let text = new.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let amount_raw = new.amount.trim();
        if amount_raw.is_empty() {
            return Err(ValidationError::EmptyAmount.into());
        }
        let magnitude = Decimal::from_str(amount_raw)
            .map_err(|_| ValidationError::InvalidAmount(amount_raw.to_string()))?;
        if magnitude.is_zero() || magnitude.abs() > MAX_AMOUNT {
            return Err(ValidationError::InvalidAmount(amount_raw.to_string()).into());
        }

        let date_raw = new.date.trim();
        if date_raw.is_empty() {
            return Err(ValidationError::EmptyDate.into());
        }
        let date = chrono::NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_raw.to_string()))?;

        let category = match normalize_category(&new.category) {
            Some(c) => c,
            None => FALLBACK_CATEGORY.to_string(),
        };

        let txn = Transaction {
            id: self.next_id(),
            text: text.to_string(),
            amount: new.kind.signed(magnitude),
            kind: new.kind,
            category,
            date: date.format("%Y-%m-%d").to_string(),
        };

        self.transactions.push(txn.clone());
        if let Err(e) = self.persist() {
            self.transactions.pop();
            return Err(e);
        }
        tracing::debug!(id = txn.id, amount = %txn.amount, category = %txn.category, "transaction added");
        Ok(txn)
    }

    /// Remove the entry with `id`. Unknown ids are not an error.
    pub(crate) fn remove_transaction(&mut self, id: i64) -> Result<Option<Transaction>> {
        let Some(idx) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "transaction not found");
            return Ok(None);
        };
        let removed = self.transactions.remove(idx);
        if let Err(e) = self.persist() {
            self.transactions.insert(idx, removed);
            return Err(e);
        }
        tracing::debug!(id, "transaction removed");
        Ok(Some(removed))
    }

    /// Drop every transaction after confirmation. Budgets are kept.
    pub(crate) fn clear_all(&mut self, gate: &mut dyn ConfirmGate) -> Result<Gated<usize>> {
        let prompt = Intent::ClearAll.confirmation_prompt().unwrap_or_default();
        if !gate.confirm(&prompt) {
            return Ok(Gated::Declined);
        }
        let previous = std::mem::take(&mut self.transactions);
        if let Err(e) = self.persist() {
            self.transactions = previous;
            return Err(e);
        }
        let count = previous.len();
        tracing::info!(count, "cleared all transactions");
        Ok(Gated::Done(count))
    }

    /// Ids derive from wall-clock milliseconds, bumped past the current
    /// maximum when the clock has not advanced.
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self.transactions.iter().map(|t| t.id).max() {
            Some(max) if now <= max => max + 1,
            _ => now,
        }
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn set_limit(&mut self, category: &str, amount: &str) -> Result<Decimal> {
        let category = normalize_category(category).ok_or(ValidationError::EmptyCategory)?;
        let limit = budget::parse_limit(amount)?;
        let previous = self.budgets.insert(category.clone(), limit);
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.budgets.insert(category, old),
                None => self.budgets.remove(&category),
            };
            return Err(e);
        }
        tracing::debug!(%category, %limit, "budget set");
        Ok(limit)
    }

    /// Remove a limit after confirmation. A missing limit is a no-op.
    pub(crate) fn remove_limit(
        &mut self,
        category: &str,
        gate: &mut dyn ConfirmGate,
    ) -> Result<Gated<Option<Decimal>>> {
        let category = normalize_category(category).unwrap_or_default();
        let prompt = Intent::RemoveBudget(category.clone())
            .confirmation_prompt()
            .unwrap_or_default();
        if !gate.confirm(&prompt) {
            return Ok(Gated::Declined);
        }
        let removed = self.budgets.remove(&category);
        if let Some(old) = removed {
            if let Err(e) = self.persist() {
                self.budgets.insert(category, old);
                return Err(e);
            }
        }
        tracing::debug!(%category, found = removed.is_some(), "budget removed");
        Ok(Gated::Done(removed))
    }

    pub(crate) fn spent_in_category(&self, category: &str) -> Decimal {
        budget::spent_in_category(&self.transactions, category)
    }

    pub(crate) fn over_budget_categories(&self) -> BTreeSet<String> {
        budget::over_budget_categories(&self.transactions, &self.budgets)
    }

    pub(crate) fn check_and_notify(&self, category: &str) -> Option<BudgetWarning> {
        budget::check_and_notify(&self.transactions, &self.budgets, category)
    }

    // ── Theme ─────────────────────────────────────────────────

    pub(crate) fn set_theme(&mut self, theme: ThemePreference) -> Result<()> {
        self.storage
            .set(KEY_THEME, &serde_json::to_string(&theme)?)?;
        self.theme = theme;
        tracing::debug!(%theme, "theme saved");
        Ok(())
    }

    // ── Intents ───────────────────────────────────────────────

    /// Handle a typed intent from a presentation layer.
    pub(crate) fn apply(&mut self, intent: Intent, gate: &mut dyn ConfirmGate) -> Result<Outcome> {
        match intent {
            Intent::AddTransaction(new) => {
                let transaction = self.add_transaction(new)?;
                let over_budget = self.check_and_notify(&transaction.category);
                Ok(Outcome::Added {
                    transaction,
                    over_budget,
                })
            }
            Intent::DeleteTransaction(id) => Ok(Outcome::Deleted(self.remove_transaction(id)?)),
            Intent::ClearAll => Ok(match self.clear_all(gate)? {
                Gated::Declined => Outcome::Declined,
                Gated::Done(_) => Outcome::Cleared,
            }),
            Intent::SetBudget { category, amount } => {
                let limit = self.set_limit(&category, &amount)?;
                let category = normalize_category(&category).unwrap_or(category);
                let over_budget = self.check_and_notify(&category);
                Ok(Outcome::BudgetSet {
                    category,
                    limit,
                    over_budget,
                })
            }
            Intent::RemoveBudget(category) => Ok(match self.remove_limit(&category, gate)? {
                Gated::Declined => Outcome::Declined,
                Gated::Done(removed) => Outcome::BudgetRemoved(removed),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}

/// Trim a category and map it onto the default spelling when it matches one.
fn normalize_category(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        canonical_category(trimmed)
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()),
    )
}

fn read_payload<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read payload, starting empty");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed payload, starting empty");
            T::default()
        }
    }
}

/// Accepts both a JSON string (`"dark"`) and a bare word (`dark`).
fn read_theme(storage: &dyn Storage) -> ThemePreference {
    match storage.get(KEY_THEME) {
        Ok(Some(raw)) => serde_json::from_str(&raw)
            .ok()
            .or_else(|| ThemePreference::parse(&raw))
            .unwrap_or_default(),
        _ => ThemePreference::default(),
    }
}
