use anyhow::{Context, Result};
use chrono::Datelike;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::ledger::{Answer, ConfirmGate, Intent, Ledger, NewTransaction, Outcome};
use crate::models::{ThemePreference, TxnType, DEFAULT_CATEGORIES};
use crate::query::{self, Filter};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger, config: &Config) -> Result<()> {
    let cur = config.currency.as_str();
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], ledger, cur),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger, cur),
        "summary" | "s" => cli_summary(&args[2..], ledger, cur),
        "budget" => cli_budget(&args[2..], ledger, cur),
        "unbudget" => cli_unbudget(&args[2..], ledger),
        "budgets" => cli_budgets(ledger, cur),
        "monthly" => cli_monthly(ledger, cur),
        "calendar" | "cal" => cli_calendar(&args[2..], ledger),
        "clear" => cli_clear(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger),
        "theme" => cli_theme(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerly {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Ledgerly — local-only income/expense tracker");
    println!();
    println!("Usage: ledgerly [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  add <income|expense> <amount> <date> <category> <text...>");
    println!("                                           Record an entry (date is YYYY-MM-DD)");
    println!("  delete <id>                              Delete an entry");
    println!("  list [--search <term>] [--date <date>]   List entries (! marks over-budget rows)");
    println!("  summary [--search <term>] [--date <date>]");
    println!("                                           Print balance, income and expense");
    println!("  budget <category> <amount>               Set a spending limit");
    println!("  unbudget <category> [--yes]              Remove a spending limit");
    println!("  budgets                                  Show limits and spending");
    println!("  monthly                                  Income/expense per month");
    println!("  calendar [YYYY-MM]                       Entries for a month");
    println!("  clear [--yes]                            Delete every entry (budgets are kept)");
    println!("  export [path]                            Export entries to CSV");
    println!("  theme [dark|light]                       Show or set the theme");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
    println!();
    println!("Categories: {}", DEFAULT_CATEGORIES.join(", "));
}

/// Asks on stdin unless `--yes` was given.
struct PromptGate {
    assume_yes: bool,
}

impl PromptGate {
    fn from_args(args: &[String]) -> Self {
        Self {
            assume_yes: args.iter().any(|a| a == "--yes" || a == "-y"),
        }
    }
}

impl ConfirmGate for PromptGate {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn filter_from_args(args: &[String]) -> Filter {
    Filter::new(
        flag_value(args, "--search").unwrap_or_default(),
        flag_value(args, "--date").unwrap_or_default(),
    )
}

fn cli_add(args: &[String], ledger: &mut Ledger, cur: &str) -> Result<()> {
    if args.len() < 5 {
        anyhow::bail!("Usage: ledgerly add <income|expense> <amount> <date> <category> <text...>");
    }
    let kind = TxnType::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Type must be 'income' or 'expense', got '{}'", args[0]))?;
    let new = NewTransaction {
        text: args[4..].join(" "),
        amount: args[1].clone(),
        kind,
        category: args[3].clone(),
        date: args[2].clone(),
    };

    let outcome = ledger.apply(Intent::AddTransaction(new), &mut Answer::Yes)?;
    if let Outcome::Added {
        transaction,
        over_budget,
    } = outcome
    {
        println!(
            "Added #{}: {} {} ({}, {})",
            transaction.id,
            transaction.text,
            format_amount(transaction.amount, cur),
            transaction.category,
            transaction.date
        );
        if let Some(warning) = over_budget {
            eprintln!("Warning: {warning}");
        }
    }
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let id: i64 = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: ledgerly delete <id>"))?
        .parse()
        .context("Transaction id must be a number")?;

    match ledger.apply(Intent::DeleteTransaction(id), &mut Answer::Yes)? {
        Outcome::Deleted(Some(txn)) => println!("Deleted #{}: {}", txn.id, txn.text),
        _ => println!("No transaction with id {id}"),
    }
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger, cur: &str) -> Result<()> {
    let filter = filter_from_args(args);
    let view = filter.apply(ledger.transactions());
    if view.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    let over = ledger.over_budget_categories();
    println!(
        "{:<1} {:<14} {:<11} {:<14} {:<28} {:>14}",
        "", "ID", "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(88));
    for txn in &view {
        let mark = if crate::budget::is_flagged(txn, &over) {
            "!"
        } else {
            ""
        };
        println!(
            "{:<1} {:<14} {:<11} {:<14} {:<28} {:>14}",
            mark,
            txn.id,
            txn.date,
            crate::ui::util::truncate(&txn.category, 14),
            crate::ui::util::truncate(&txn.text, 28),
            format_amount(txn.amount, cur),
        );
    }
    println!();
    print_totals(&query::aggregate(view.iter().copied()), cur);
    Ok(())
}

fn print_totals(totals: &query::Totals, cur: &str) {
    let t = totals.rounded();
    println!("  Balance:   {}", format_amount(t.net, cur));
    println!("  Income:    {}", format_amount(t.income, cur));
    println!("  Expense:   {}", format_amount(t.expense, cur));
}

fn cli_summary(args: &[String], ledger: &Ledger, cur: &str) -> Result<()> {
    let filter = filter_from_args(args);
    let view = filter.apply(ledger.transactions());
    println!("Ledgerly — {} of {} entries", view.len(), ledger.len());
    println!("{}", "─".repeat(40));
    print_totals(&query::aggregate(view.iter().copied()), cur);

    let over = ledger.over_budget_categories();
    if !over.is_empty() {
        println!();
        println!(
            "Over budget: {}",
            over.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], ledger: &mut Ledger, cur: &str) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: ledgerly budget <category> <amount>");
    }
    // Last token is the amount, everything before is the category name
    let amount = args[args.len() - 1].clone();
    let category = args[..args.len() - 1].join(" ");

    let outcome = ledger.apply(
        Intent::SetBudget { category, amount },
        &mut Answer::Yes,
    )?;
    if let Outcome::BudgetSet {
        category,
        limit,
        over_budget,
    } = outcome
    {
        println!(
            "Budget set: {category} = {} ({} spent so far)",
            format_amount(limit, cur),
            format_amount(ledger.spent_in_category(&category), cur)
        );
        if let Some(warning) = over_budget {
            eprintln!("Warning: {warning}");
        }
    }
    Ok(())
}

fn cli_unbudget(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let category = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if category.is_empty() {
        anyhow::bail!("Usage: ledgerly unbudget <category> [--yes]");
    }

    let mut gate = PromptGate::from_args(args);
    match ledger.apply(Intent::RemoveBudget(category.clone()), &mut gate)? {
        Outcome::BudgetRemoved(Some(_)) => println!("Removed budget for {category}"),
        Outcome::BudgetRemoved(None) => println!("No budget set for {category}"),
        _ => println!("Cancelled"),
    }
    Ok(())
}

fn cli_budgets(ledger: &Ledger, cur: &str) -> Result<()> {
    let rows = crate::budget::statuses(ledger.transactions(), ledger.budgets());
    if rows.is_empty() {
        println!("No budgets. Set one with: ledgerly budget <category> <amount>");
        return Ok(());
    }

    println!("{:<18} {:>14} {:>14}  Status", "Category", "Spent", "Limit");
    println!("{}", "─".repeat(56));
    for row in &rows {
        println!(
            "{:<18} {:>14} {:>14}  {}",
            crate::ui::util::truncate(&row.category, 18),
            format_amount(row.spent, cur),
            format_amount(row.limit, cur),
            if row.over { "OVER" } else { "ok" }
        );
    }
    Ok(())
}

fn cli_monthly(ledger: &Ledger, cur: &str) -> Result<()> {
    let buckets = query::monthly_buckets(ledger.transactions());
    if buckets.is_empty() {
        println!("No transactions to display");
        return Ok(());
    }

    println!("{:<10} {:>14} {:>14}", "Month", "Income", "Expenses");
    println!("{}", "─".repeat(40));
    for (key, bucket) in &buckets {
        println!(
            "{:<10} {:>14} {:>14}",
            query::month_label(key),
            format_amount(bucket.income, cur),
            format_amount(bucket.expense, cur)
        );
    }
    Ok(())
}

fn cli_calendar(args: &[String], ledger: &Ledger) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());
    let first = chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{month}', expected YYYY-MM"))?;

    let events = query::calendar_events(ledger.transactions());
    let mut in_month = query::events_in_month(&events, first.year(), first.month());
    in_month.sort_by_key(|e| e.date);

    println!("{}", first.format("%B %Y"));
    println!("{}", "─".repeat(40));
    if in_month.is_empty() {
        println!("  No entries");
    }
    for event in in_month {
        println!("  {}  {}", event.date.format("%a %d"), event.title);
    }
    Ok(())
}

fn cli_clear(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let mut gate = PromptGate::from_args(args);
    let count = ledger.len();
    match ledger.apply(Intent::ClearAll, &mut gate)? {
        Outcome::Cleared => println!("Cleared {count} transactions (budgets kept)"),
        _ => println!("Cancelled"),
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| super::shellexpand(a))
        .unwrap_or_else(super::default_export_path);

    let count = crate::export::export_csv(Path::new(&output_path), ledger.transactions())?;
    if count == 0 {
        println!("No transactions to export (wrote header only to {output_path})");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_theme(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args.first() {
        None => println!("{}", ledger.theme()),
        Some(name) => {
            let theme = ThemePreference::parse(name)
                .ok_or_else(|| anyhow::anyhow!("Theme must be 'dark' or 'light', got '{name}'"))?;
            ledger.set_theme(theme)?;
            println!("Theme set to {theme}");
        }
    }
    Ok(())
}
