use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::budget::is_flagged;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let title = title(app);

    if app.view.is_empty() {
        let msg = if !app.filter().is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No transactions match the current filter",
                    p.dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled("Press Esc to clear it", p.dim_style())),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", p.dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :add expense 200 2024-01-10 Food Groceries",
                    p.dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(title, p.title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount", ""]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .view
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let flagged = is_flagged(txn, &app.over_budget);

            let amount_style = if txn.is_income() {
                p.income_style()
            } else {
                p.expense_style()
            };

            let style = if i == app.transaction_index {
                p.selected_style()
            } else if flagged {
                p.over_budget_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.text, 40)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(Span::styled(
                    format_signed(txn.amount, &app.currency),
                    amount_style,
                )),
                Cell::from(if flagged { "over" } else { "" })
                    .style(Style::default().fg(p.red)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(title, p.title_style())),
    );

    f.render_widget(table, area);
}

fn title(app: &App) -> String {
    let mut title = format!(" Transactions ({}) ", app.view.len());
    if !app.search_input.is_empty() {
        title.push_str(&format!("search: '{}' ", app.search_input));
    }
    if !app.date_filter.is_empty() {
        title.push_str(&format!("date: {} ", app.date_filter));
    }
    title
}
