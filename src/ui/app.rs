use chrono::{Datelike, Local, Months, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

use crate::budget::{self, BudgetStatus};
use crate::ledger::{Intent, Ledger};
use crate::models::{ThemePreference, Transaction};
use crate::query::{self, CalendarEvent, Filter, MonthBucket, Totals};
use crate::ui::util::clamp_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Calendar,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Calendar,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Calendar => write!(f, "Calendar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) date_filter: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) theme: ThemePreference,
    pub(crate) currency: String,
    pub(crate) quote: &'static str,

    // Derived from the ledger on every refresh
    pub(crate) view: Vec<Transaction>,
    pub(crate) totals: Totals,
    pub(crate) over_budget: BTreeSet<String>,
    pub(crate) budget_rows: Vec<BudgetStatus>,
    pub(crate) months: BTreeMap<String, MonthBucket>,
    pub(crate) events: Vec<CalendarEvent>,
    pub(crate) ledger_len: usize,

    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    /// First day of the month shown on the calendar.
    pub(crate) calendar_month: NaiveDate,

    // Confirmation
    pub(crate) pending: Option<Intent>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: &Ledger, currency: &str) -> Self {
        let today = Local::now().date_naive();
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            date_filter: String::new(),
            status_message: String::new(),
            show_help: false,
            theme: ledger.theme(),
            currency: currency.to_string(),
            quote: crate::quotes::quote_of_the_day(),

            view: Vec::new(),
            totals: Totals::default(),
            over_budget: BTreeSet::new(),
            budget_rows: Vec::new(),
            months: BTreeMap::new(),
            events: Vec::new(),
            ledger_len: 0,

            transaction_index: 0,
            transaction_scroll: 0,
            budget_index: 0,
            budget_scroll: 0,

            calendar_month: first_of_month(today),

            pending: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh(ledger);
        app
    }

    pub(crate) fn filter(&self) -> Filter {
        Filter::new(self.search_input.trim(), self.date_filter.as_str())
    }

    /// Recompute every derived view. Totals follow the filter; budget state
    /// is always computed over the whole ledger.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let filter = self.filter();
        let view = filter.apply(ledger.transactions());
        self.totals = query::aggregate(view.iter().copied());
        self.view = view.into_iter().cloned().collect();

        self.over_budget = ledger.over_budget_categories();
        self.budget_rows = budget::statuses(ledger.transactions(), ledger.budgets());
        self.months = query::monthly_buckets(ledger.transactions());
        self.events = query::calendar_events(ledger.transactions());
        self.ledger_len = ledger.len();
        self.theme = ledger.theme();

        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.view.len(),
        );
        clamp_cursor(
            &mut self.budget_index,
            &mut self.budget_scroll,
            self.budget_rows.len(),
        );
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.view.get(self.transaction_index)
    }

    pub(crate) fn selected_budget(&self) -> Option<&BudgetStatus> {
        self.budget_rows.get(self.budget_index)
    }

    pub(crate) fn events_this_month(&self) -> Vec<&CalendarEvent> {
        query::events_in_month(
            &self.events,
            self.calendar_month.year(),
            self.calendar_month.month(),
        )
    }

    pub(crate) fn shift_month(&mut self, forward: bool) {
        let next = if forward {
            self.calendar_month.checked_add_months(Months::new(1))
        } else {
            self.calendar_month.checked_sub_months(Months::new(1))
        };
        if let Some(d) = next {
            self.calendar_month = d;
            self.set_status(format!("Month: {}", d.format("%B %Y")));
        }
    }

    /// Park an intent behind the `[y/N]` prompt.
    pub(crate) fn ask(&mut self, intent: Intent, message: impl Into<String>) {
        self.confirm_message = message.into();
        self.pending = Some(intent);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn transaction_page(&self) -> usize {
        // Table border and header
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn budget_page(&self) -> usize {
        self.visible_rows.saturating_sub(2).max(1)
    }
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
