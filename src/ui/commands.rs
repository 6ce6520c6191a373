use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{first_of_month, App, InputMode, Screen};
use crate::ledger::{Answer, ConfirmGate, Intent, Ledger, NewTransaction, Outcome};
use crate::models::{ThemePreference, TxnType};
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Ledgerly", cmd_quit, r);
    register_command!("quit", "Quit Ledgerly", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("cal", "Go to Calendar", cmd_calendar, r);
    register_command!("calendar", "Go to Calendar", cmd_calendar, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add entry (e.g. :add expense 200 2024-01-10 Food Groceries)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add entry (e.g. :a income 5000 2024-01-05 Salary Paycheck)",
        cmd_add,
        r
    );
    register_command!(
        "delete",
        "Delete selected entry, or one by id (e.g. :delete 1704412800000)",
        cmd_delete,
        r
    );
    register_command!("clear", "Delete every entry (budgets are kept)", cmd_clear, r);
    register_command!(
        "budget",
        "Set budget limit (e.g. :budget Food 150)",
        cmd_budget,
        r
    );
    register_command!(
        "unbudget",
        "Remove budget for a category, or the selected one",
        cmd_unbudget,
        r
    );
    register_command!(
        "search",
        "Search description/category (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search description/category", cmd_search, r);
    register_command!(
        "date",
        "Show one day only (e.g. :date 2024-01-10), no argument clears",
        cmd_date,
        r
    );
    register_command!(
        "month",
        "Calendar month (e.g. :month 2024-01)",
        cmd_month,
        r
    );
    register_command!("m", "Calendar month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Calendar: next month", cmd_next_month, r);
    register_command!("prev-month", "Calendar: previous month", cmd_prev_month, r);
    register_command!(
        "theme",
        "Switch theme (e.g. :theme light), no argument toggles",
        cmd_theme,
        r
    );
    register_command!(
        "export",
        "Export entries to CSV (e.g. :export ~/ledger.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Run an intent against the ledger and report the outcome on the status
/// line. Validation failures are shown, not propagated.
pub(crate) fn dispatch(
    intent: Intent,
    gate: &mut dyn ConfirmGate,
    app: &mut App,
    ledger: &mut Ledger,
) -> anyhow::Result<()> {
    let outcome = match ledger.apply(intent, gate) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(v) = e.as_validation() {
                app.set_status(v.to_string());
                return Ok(());
            }
            return Err(e.into());
        }
    };

    let cur = app.currency.clone();
    let status = match outcome {
        Outcome::Added {
            transaction,
            over_budget,
        } => match over_budget {
            Some(warning) => format!("⚠ {warning}"),
            None => format!(
                "Added: {} {} ({})",
                transaction.text,
                format_amount(transaction.amount, &cur),
                transaction.category
            ),
        },
        Outcome::Deleted(Some(txn)) => format!("Deleted: {}", txn.text),
        Outcome::Deleted(None) => "Nothing to delete".into(),
        Outcome::Cleared => "All transactions cleared".into(),
        Outcome::BudgetSet {
            category,
            limit,
            over_budget,
        } => match over_budget {
            Some(warning) => format!("⚠ {warning}"),
            None => format!("Budget set: {category} = {}", format_amount(limit, &cur)),
        },
        Outcome::BudgetRemoved(Some(_)) => "Budget removed".into(),
        Outcome::BudgetRemoved(None) => "No budget for that category".into(),
        Outcome::Declined => "Cancelled".into(),
    };

    app.refresh(ledger);
    app.set_status(status);
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_calendar(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Calendar;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <income|expense> <amount> <date> <category> <description>";

    let parts: Vec<&str> = args.splitn(5, ' ').collect();
    if parts.len() < 5 {
        app.set_status(USAGE);
        return Ok(());
    }
    let Some(kind) = TxnType::parse(parts[0]) else {
        app.set_status(format!("Type must be income or expense, got '{}'", parts[0]));
        return Ok(());
    };

    let new = NewTransaction {
        text: parts[4].to_string(),
        amount: parts[1].to_string(),
        kind,
        category: parts[3].to_string(),
        date: parts[2].to_string(),
    };
    dispatch(Intent::AddTransaction(new), &mut Answer::Yes, app, ledger)
}

fn cmd_delete(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        if app.screen != Screen::Transactions {
            app.set_status("Navigate to Transactions and select one first");
            return Ok(());
        }
        app.selected_transaction().cloned()
    } else {
        match args.parse::<i64>() {
            Ok(id) => ledger.get(id).cloned(),
            Err(_) => {
                app.set_status(format!("Not a transaction id: {args}"));
                return Ok(());
            }
        }
    };

    match target {
        Some(txn) => app.ask(
            Intent::DeleteTransaction(txn.id),
            format!("Delete '{}'?", txn.text),
        ),
        None => app.set_status("No such transaction"),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if ledger.is_empty() {
        app.set_status("No transactions to clear");
        return Ok(());
    }
    let intent = Intent::ClearAll;
    let prompt = intent.confirmation_prompt().unwrap_or_default();
    app.ask(intent, prompt);
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    // Last token is the amount, everything before it is the category.
    let Some((category, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :budget <category> <amount>. Example: :budget Food 150");
        return Ok(());
    };
    let intent = Intent::SetBudget {
        category: category.trim().to_string(),
        amount: amount.to_string(),
    };
    dispatch(intent, &mut Answer::Yes, app, ledger)
}

fn cmd_unbudget(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    let category = if args.is_empty() {
        match (app.screen, app.selected_budget()) {
            (Screen::Budgets, Some(row)) => row.category.clone(),
            _ => {
                app.set_status("Usage: :unbudget <category>, or select a budget first");
                return Ok(());
            }
        }
    } else {
        args.to_string()
    };

    let intent = Intent::RemoveBudget(category);
    let prompt = intent.confirmation_prompt().unwrap_or_default();
    app.ask(intent, prompt);
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh(ledger);
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("{} matches for '{args}'", app.view.len()));
    }
    Ok(())
}

fn cmd_date(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.date_filter.clear();
        app.set_status("Date filter cleared");
    } else if let Ok(date) = chrono::NaiveDate::parse_from_str(args, "%Y-%m-%d") {
        app.date_filter = date.format("%Y-%m-%d").to_string();
        app.screen = Screen::Transactions;
        app.set_status(format!("Showing {}", app.date_filter));
    } else {
        app.set_status("Invalid date format. Use YYYY-MM-DD (e.g. 2024-01-10)");
        return Ok(());
    }
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh(ledger);
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.calendar_month = first_of_month(chrono::Local::now().date_naive());
        app.screen = Screen::Calendar;
        return Ok(());
    }

    // Accept "2024-01", "2024-1", "01", "1"
    let month = if args.len() <= 2 {
        format!("{}-{args:0>2}", app.calendar_month.format("%Y"))
    } else {
        args.to_string()
    };

    match chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d") {
        Ok(date) => {
            app.calendar_month = date;
            app.screen = Screen::Calendar;
            app.set_status(format!("Month: {}", date.format("%B %Y")));
        }
        Err(_) => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.shift_month(true);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.shift_month(false);
    Ok(())
}

fn cmd_theme(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let theme = if args.is_empty() {
        ledger.theme().toggled()
    } else {
        match ThemePreference::parse(args) {
            Some(t) => t,
            None => {
                app.set_status("Theme must be dark or light");
                return Ok(());
            }
        }
    };
    if let Err(e) = ledger.set_theme(theme) {
        tracing::warn!(error = %e, "failed to save theme");
        app.set_status(format!("Could not save theme: {e}"));
        return Ok(());
    }
    app.theme = theme;
    app.set_status(format!("Theme: {theme}"));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::run::default_export_path()
    } else {
        crate::run::shellexpand(args)
    };

    let count = match crate::export::export_csv(Path::new(&path), ledger.transactions()) {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = ?e, "export failed");
            app.set_status(format!("Export failed: {e:#}"));
            return Ok(());
        }
    };
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}

/// Resolve the pending confirm prompt.
pub(crate) fn resolve_pending(answer: Answer, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let Some(intent) = app.pending.take() else {
        return Ok(());
    };

    // Deletion has no gate of its own, so a "no" never reaches the store.
    if answer == Answer::No && matches!(intent, Intent::DeleteTransaction(_)) {
        app.set_status("Cancelled");
        return Ok(());
    }
    let mut gate = answer;
    dispatch(intent, &mut gate, app, ledger)
}
