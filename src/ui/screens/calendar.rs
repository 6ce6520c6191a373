use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        calendar::{CalendarEventStore, Monthly},
        Block, Borders, List, ListItem, Paragraph,
    },
    Frame,
};

use crate::query::Tone;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(area);

    render_month_grid(f, chunks[0], app, p);
    render_event_list(f, chunks[1], app, p);
}

fn render_month_grid(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(" Month ", p.title_style()));

    let Some(shown) = to_time_date(app.calendar_month) else {
        f.render_widget(Paragraph::new("Date out of range").block(block), area);
        return;
    };

    // A day with both kinds of entry keeps the expense colour.
    let mut store = CalendarEventStore::default();
    let income = Style::default().fg(p.green).add_modifier(Modifier::BOLD);
    let expense = Style::default().fg(p.red).add_modifier(Modifier::BOLD);
    let events = app.events_this_month();
    for event in events.iter().filter(|e| e.tone == Tone::Income) {
        if let Some(d) = to_time_date(event.date) {
            store.add(d, income);
        }
    }
    for event in events.iter().filter(|e| e.tone == Tone::Expense) {
        if let Some(d) = to_time_date(event.date) {
            store.add(d, expense);
        }
    }

    let grid = Monthly::new(shown, store)
        .show_month_header(Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        .show_weekdays_header(p.dim_style())
        .default_style(p.normal_style())
        .block(block);
    f.render_widget(grid, area);
}

fn render_event_list(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let title = format!(" {} ", app.calendar_month.format("%B %Y"));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(title, p.title_style()));

    let mut events = app.events_this_month();
    if events.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No entries this month", p.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }
    events.sort_by_key(|e| e.date);

    let width = area.width.saturating_sub(12) as usize;
    let items: Vec<ListItem> = events
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|event| {
            let style = match event.tone {
                Tone::Income => p.income_style(),
                Tone::Expense => p.expense_style(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", event.date.format("%a %d")), p.dim_style()),
                Span::styled(truncate(&event.title, width), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn to_time_date(date: NaiveDate) -> Option<time::Date> {
    let month = time::Month::try_from(u8::try_from(date.month()).ok()?).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    time::Date::from_calendar_date(date.year(), month, day).ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_to_time_date() {
        let d = to_time_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), time::Month::February);
        assert_eq!(d.day(), 29);
    }
}
