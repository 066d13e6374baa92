use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::centered_rect;
use crate::models::Category;
use crate::store::BudgetState;

pub(crate) fn render(f: &mut Frame, app: &App, state: &BudgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app, state);
    render_screen(f, chunks[1], app, state);
    render_status_bar(f, chunks[2], app, state);
    render_command_bar(f, chunks[3], app);

    if state.modal {
        super::screens::expense_form::render(f, f.area(), app);
    }

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let filter = state
        .current_category
        .as_deref()
        .and_then(Category::find_by_id)
        .map(|c| format!("filter: {} {}", c.glyph(), c.name))
        .unwrap_or_else(|| "all categories".into());

    let line = Line::from(vec![
        Span::styled(
            " BudgetForm ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::OVERLAY)),
        Span::styled(format!("{}", app.screen), theme::dim_style()),
        Span::styled(" | ", Style::default().fg(theme::OVERLAY)),
        Span::styled(filter, theme::dim_style()),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    match app.screen {
        Screen::BudgetForm => super::screens::budget_form::render(f, area, app, state),
        Screen::Tracker => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(7), Constraint::Min(3)])
                .split(area);
            super::screens::tracker::render(f, chunks[0], state);
            super::screens::expenses::render(f, chunks[1], app, state);
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Form => theme::PINK,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} expenses",
        app.screen,
        state.expenses.len()
    );

    let right = match (app.screen, app.input_mode) {
        (_, InputMode::Form) => " Tab next | ←/→ category | Enter save | Esc close ",
        (Screen::BudgetForm, _) => " Enter define budget | Esc back | ? help ",
        (Screen::Tracker, _) => " n new | e edit | D delete | f filter | R reset | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " BudgetForm Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Expenses"),
        Line::from(Span::styled(
            "  n               New expense           e / Enter  Edit selected",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  D               Delete selected       B          Redefine budget",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  f / F           Next/prev category    0          Clear filter",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down  Move cursor           g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  R               Reset app             Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Expense form"),
        Line::from(Span::styled(
            "  Tab/Shift-Tab   Next/prev field       Left/Right Pick category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter           Save                  Esc        Close",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_area = centered_rect(76, help_text.len() as u16 + 2, area);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
