#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, InputMode, Screen};
use super::commands::{handle_command, resolve_pending};
use crate::db::MemoryStorage;
use crate::ledger::{Answer, Ledger};
use crate::models::ThemePreference;

fn setup() -> (App, Ledger) {
    let ledger = Ledger::load(Box::new(MemoryStorage::new()));
    let app = App::new(&ledger, "₹");
    (app, ledger)
}

fn run(input: &str, app: &mut App, ledger: &mut Ledger) {
    handle_command(input, app, ledger).unwrap();
}

fn seeded() -> (App, Ledger) {
    let (mut app, mut ledger) = setup();
    run("add income 5000 2024-01-05 Salary Paycheck", &mut app, &mut ledger);
    run("add expense 200 2024-01-10 Food Groceries", &mut app, &mut ledger);
    (app, ledger)
}

#[test]
fn test_add_updates_view_and_totals() {
    let (app, ledger) = seeded();
    assert_eq!(ledger.len(), 2);
    assert_eq!(app.view.len(), 2);
    assert_eq!(app.totals.net, dec!(4800));
    assert_eq!(app.totals.income, dec!(5000));
    assert_eq!(app.totals.expense, dec!(200));
    assert!(app.status_message.starts_with("Added: Groceries"));
}

#[test]
fn test_add_keeps_multi_word_description() {
    let (mut app, mut ledger) = setup();
    run("add expense 12.5 2024-02-01 Transport Bus to work", &mut app, &mut ledger);
    assert_eq!(ledger.transactions()[0].text, "Bus to work");
    assert_eq!(ledger.transactions()[0].amount, dec!(-12.5));
}

#[test]
fn test_add_validation_error_goes_to_status() {
    let (mut app, mut ledger) = setup();
    run("add expense abc 2024-01-10 Food Groceries", &mut app, &mut ledger);
    assert!(ledger.is_empty());
    assert_eq!(app.status_message, "Invalid amount: abc");

    run("add expense 10 2024-13-40 Food Groceries", &mut app, &mut ledger);
    assert!(ledger.is_empty());
    assert!(app.status_message.starts_with("Invalid date"));
}

#[test]
fn test_add_usage_and_bad_type() {
    let (mut app, mut ledger) = setup();
    run("add expense 10", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Usage: :add"));
    run("add refund 10 2024-01-10 Food Groceries", &mut app, &mut ledger);
    assert!(app.status_message.contains("income or expense"));
    assert!(ledger.is_empty());
}

#[test]
fn test_over_budget_warning_after_add() {
    let (mut app, mut ledger) = seeded();
    run("budget Food 150", &mut app, &mut ledger);
    // Setting the limit below current spending warns straight away.
    assert!(app.status_message.starts_with('⚠'));
    assert!(app.over_budget.contains("Food"));

    run("add expense 100 2024-01-11 Food Dinner", &mut app, &mut ledger);
    assert_eq!(ledger.len(), 3);
    assert!(app
        .status_message
        .contains("You've exceeded the budget limit for Food!"));
    assert_eq!(app.budget_rows[0].spent, dec!(300));
}

#[test]
fn test_budget_rejects_non_positive() {
    let (mut app, mut ledger) = setup();
    run("budget Food 0", &mut app, &mut ledger);
    assert!(ledger.budgets().is_empty());
    assert!(app.status_message.starts_with("Enter valid amount"));
    run("budget Food", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Usage: :budget"));
}

#[test]
fn test_clear_declined_then_accepted() {
    let (mut app, mut ledger) = seeded();
    run("budget Food 150", &mut app, &mut ledger);

    run("clear", &mut app, &mut ledger);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.confirm_message,
        "Are you sure you want to clear all transactions?"
    );
    resolve_pending(Answer::No, &mut app, &mut ledger).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(ledger.len(), 2);
    assert_eq!(app.status_message, "Cancelled");

    run("clear", &mut app, &mut ledger);
    resolve_pending(Answer::Yes, &mut app, &mut ledger).unwrap();
    assert!(ledger.is_empty());
    assert!(app.view.is_empty());
    assert_eq!(ledger.budgets().get("Food"), Some(&dec!(150)));
}

#[test]
fn test_clear_on_empty_ledger_does_not_prompt() {
    let (mut app, mut ledger) = setup();
    run("clear", &mut app, &mut ledger);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending.is_none());
}

#[test]
fn test_delete_selected_needs_confirmation() {
    let (mut app, mut ledger) = seeded();
    app.screen = Screen::Transactions;
    app.transaction_index = 1;

    run("delete", &mut app, &mut ledger);
    assert_eq!(app.confirm_message, "Delete 'Groceries'?");
    resolve_pending(Answer::No, &mut app, &mut ledger).unwrap();
    assert_eq!(ledger.len(), 2);

    run("delete", &mut app, &mut ledger);
    resolve_pending(Answer::Yes, &mut app, &mut ledger).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.transactions()[0].text, "Paycheck");
    // Cursor follows the shrunk list.
    assert_eq!(app.transaction_index, 0);
}

#[test]
fn test_delete_by_id_and_unknown_id() {
    let (mut app, mut ledger) = seeded();
    let id = ledger.transactions()[0].id;
    run(&format!("delete {id}"), &mut app, &mut ledger);
    resolve_pending(Answer::Yes, &mut app, &mut ledger).unwrap();
    assert!(ledger.get(id).is_none());

    run("delete 42", &mut app, &mut ledger);
    assert!(app.pending.is_none());
    assert_eq!(app.status_message, "No such transaction");
}

#[test]
fn test_unbudget_selected_row() {
    let (mut app, mut ledger) = setup();
    run("budget Food 150", &mut app, &mut ledger);
    run("budget Bills 90", &mut app, &mut ledger);
    app.screen = Screen::Budgets;
    app.budget_index = 0; // Bills, BTreeMap order

    run("unbudget", &mut app, &mut ledger);
    assert_eq!(app.confirm_message, "Remove budget for Bills?");
    resolve_pending(Answer::Yes, &mut app, &mut ledger).unwrap();
    assert!(!ledger.budgets().contains_key("Bills"));
    assert!(ledger.budgets().contains_key("Food"));
}

#[test]
fn test_search_and_date_filters() {
    let (mut app, mut ledger) = seeded();
    run("search food", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Transactions);
    assert_eq!(app.view.len(), 1);
    assert_eq!(app.totals.expense, dec!(200));
    assert_eq!(app.totals.income, dec!(0));

    run("search", &mut app, &mut ledger);
    assert_eq!(app.view.len(), 2);

    run("date 2024-01-05", &mut app, &mut ledger);
    assert_eq!(app.view.len(), 1);
    assert_eq!(app.view[0].text, "Paycheck");

    run("date nope", &mut app, &mut ledger);
    assert_eq!(app.date_filter, "2024-01-05");

    run("date", &mut app, &mut ledger);
    assert_eq!(app.view.len(), 2);
}

#[test]
fn test_budget_state_ignores_filter() {
    let (mut app, mut ledger) = seeded();
    run("budget Food 150", &mut app, &mut ledger);
    run("search salary", &mut app, &mut ledger);
    assert!(app.over_budget.contains("Food"));
}

#[test]
fn test_theme_toggle_and_set() {
    let (mut app, mut ledger) = setup();
    run("theme", &mut app, &mut ledger);
    assert_eq!(app.theme, ThemePreference::Light);
    assert_eq!(ledger.theme(), ThemePreference::Light);

    run("theme dark", &mut app, &mut ledger);
    assert_eq!(ledger.theme(), ThemePreference::Dark);

    run("theme purple", &mut app, &mut ledger);
    assert_eq!(ledger.theme(), ThemePreference::Dark);
}

#[test]
fn test_month_command() {
    let (mut app, mut ledger) = setup();
    run("month 2024-02", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Calendar);
    assert_eq!(app.calendar_month.to_string(), "2024-02-01");

    run("next-month", &mut app, &mut ledger);
    assert_eq!(app.calendar_month.to_string(), "2024-03-01");

    run("month 13", &mut app, &mut ledger);
    assert_eq!(app.calendar_month.to_string(), "2024-03-01");
    assert!(app.status_message.starts_with("Invalid month"));
}

#[test]
fn test_export_command() {
    let (mut app, mut ledger) = seeded();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    run(&format!("export {}", path.display()), &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Exported 2 transactions"));
    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body.lines().count(), 3);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut ledger) = setup();
    run("buget Food 10", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Unknown command: :buget. Did you mean :budget?"
    );
    assert!(ledger.budgets().is_empty());
}

#[test]
fn test_quit() {
    let (mut app, mut ledger) = setup();
    run("q", &mut app, &mut ledger);
    assert!(!app.running);
}

#[test]
fn test_export_failure_stays_in_app() {
    let (mut app, mut ledger) = seeded();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    run(&format!("export {}", path.display()), &mut app, &mut ledger);
    assert!(app.running);
    assert!(app.status_message.starts_with("Export failed"));
}

#[test]
fn test_theme_save_failure_stays_in_app() {
    let storage = MemoryStorage::new();
    let fail = storage.fail_switch();
    let mut ledger = Ledger::load(Box::new(storage));
    let mut app = App::new(&ledger, "₹");

    fail.set(true);
    run("theme light", &mut app, &mut ledger);
    assert!(app.running);
    assert!(app.status_message.starts_with("Could not save theme"));
    assert_eq!(app.theme, ThemePreference::Dark);
    assert_eq!(ledger.theme(), ThemePreference::Dark);
}
