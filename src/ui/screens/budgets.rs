use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    if app.budget_rows.is_empty() {
        render_empty(f, area, p);
        return;
    }

    let items: Vec<ListItem> = app
        .budget_rows
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let ratio = row.ratio();
            let color = if row.over {
                p.red
            } else if ratio > 0.8 {
                p.yellow
            } else {
                p.green
            };

            let style = if i == app.budget_index {
                p.selected_style()
            } else if i % 2 == 0 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            let display_name = truncate(&row.category, 17);
            let status = if row.over { " OVER" } else { "" };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{} / {} ",
                        format_amount(row.spent, &app.currency),
                        format_amount(row.limit, &app.currency)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(create_progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%{status}", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(
                format!(" Budgets ({}) ", app.budget_rows.len()),
                p.title_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect, p: &Palette) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets set", p.dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <category> <amount> to set a spending limit",
            p.dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(" Budgets ", p.title_style())),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
