use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme::{palette, Palette};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let p = palette(app.theme);

    f.render_widget(
        Block::default().style(Style::default().bg(p.header_bg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app, p);
    render_screen(f, chunks[1], app, p);
    render_status_bar(f, chunks[2], app, p);
    render_command_bar(f, chunks[3], app, p);

    if app.show_help {
        render_help_overlay(f, f.area(), p);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), p.dim_style()),
                    Span::styled(
                        format!("{s}"),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), p.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app, p),
        Screen::Transactions => super::screens::transactions::render(f, area, app, p),
        Screen::Budgets => super::screens::budgets::render(f, area, app, p),
        Screen::Calendar => super::screens::calendar::render(f, area, app, p),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => p.accent,
        InputMode::Command => p.green,
        InputMode::Search => p.yellow,
        InputMode::Confirm => p.red,
    };
    let mode_style = Style::default()
        .fg(p.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let mut info = format!(
        " {} | {} of {} txns",
        app.screen,
        app.view.len(),
        app.ledger_len
    );
    if !app.date_filter.is_empty() {
        info.push_str(&format!(" | date {}", app.date_filter));
    }
    if !app.over_budget.is_empty() {
        info.push_str(&format!(" | {} over budget", app.over_budget.len()));
    }

    let right = match app.screen {
        Screen::Dashboard => " :add | T theme | ? help ",
        Screen::Transactions => " D delete | /search | :date | ? help ",
        Screen::Budgets => " :budget set | D remove | ? help ",
        Screen::Calendar => " H/L month | :month | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(p.accent)),
                Span::styled(&app.command_input, p.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Search => {
            let match_info = if !app.search_input.is_empty() {
                format!("  ({} matches)", app.view.len())
            } else {
                String::new()
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(p.yellow)),
                    Span::styled(&app.search_input, p.command_bar_style()),
                    Span::styled(match_info, p.dim_style()),
                ]),
                Some(1 + app.search_input.chars().count() as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    p.dim_style(),
                ))
            } else if app.status_message.starts_with('⚠') {
                Line::from(Span::styled(
                    &app.status_message,
                    Style::default().fg(p.red).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect, p: &Palette) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, p.normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " Ledgerly Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Navigation"),
        row("  j/k or Up/Down   Move cursor           1-4        Switch tabs"),
        row("  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom"),
        row("  H/L (Calendar)   Prev/Next month       Ctrl-d/u   Page Down/Up"),
        row("  T                Toggle theme          Ctrl-q     Quit"),
        Line::from(""),
        section(" Actions"),
        row("  :               Command mode           /          Search (live)"),
        row("  D (Transactions) Delete entry          D (Budgets) Remove budget"),
        row("  Esc             Clear filters"),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        p.dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 84.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
