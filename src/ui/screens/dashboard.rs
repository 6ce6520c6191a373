use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::query::month_label;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::format_amount;

/// Most recent months shown in the chart.
const CHART_MONTHS: usize = 6;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Length(4), // Quote
            Constraint::Min(8),    // Monthly chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, p);
    render_quote(f, chunks[1], app, p);
    render_monthly_chart(f, chunks[2], app, p);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = app.totals.rounded();
    let income_count = app.view.iter().filter(|t| t.is_income()).count();
    let expense_count = app.view.iter().filter(|t| t.is_expense()).count();

    let balance_color = if totals.net >= Decimal::ZERO {
        p.green
    } else {
        p.red
    };
    let balance_sub = if app.filter().is_empty() {
        format!("{} txns", app.view.len())
    } else {
        format!("{} of {} txns (filtered)", app.view.len(), app.ledger_len)
    };

    render_card(f, cards[0], p, "Balance", totals.net, balance_color, balance_sub, &app.currency);
    render_card(
        f,
        cards[1],
        p,
        "Income",
        totals.income,
        p.green,
        format!("{income_count} txns"),
        &app.currency,
    );
    render_card(
        f,
        cards[2],
        p,
        "Expense",
        totals.expense,
        p.red,
        format!("{expense_count} txns"),
        &app.currency,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_card(
    f: &mut Frame,
    area: Rect,
    p: &Palette,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: String,
    currency: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(format!(" {title} "), p.title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, p.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_quote(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let quote = Paragraph::new(Line::from(Span::styled(
        app.quote,
        Style::default().fg(p.text).add_modifier(Modifier::ITALIC),
    )))
    .wrap(Wrap { trim: true })
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(" Quote of the day ", p.title_style())),
    );
    f.render_widget(quote, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(" Monthly Income vs Expenses ", p.title_style()));

    if app.months.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No transactions to display", p.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let skip = app.months.len().saturating_sub(CHART_MONTHS);
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(7)
        .bar_gap(1)
        .group_gap(3)
        .value_style(Style::default().fg(p.header_bg).add_modifier(Modifier::BOLD));

    for (key, bucket) in app.months.iter().skip(skip) {
        let bars = [
            Bar::default()
                .value(bucket.income.round().to_u64().unwrap_or(0))
                .text_value(compact(bucket.income))
                .style(Style::default().fg(p.green)),
            Bar::default()
                .value(bucket.expense.round().to_u64().unwrap_or(0))
                .text_value(compact(bucket.expense))
                .style(Style::default().fg(p.red)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(month_label(key)).centered())
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

/// Short bar label: `950`, `12.4k`, `3.1M`.
fn compact(val: Decimal) -> String {
    let v = val.to_f64().unwrap_or(0.0);
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 10_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}
