use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::store::BudgetState;
use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::ui::util::{centered_rect, format_amount};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let form = &app.budget_form;
    let valid = form.is_valid();

    let input = if form.input.is_empty() {
        Span::styled("Enter your budget", theme::dim_style())
    } else {
        Span::styled(form.input.as_str(), theme::input_style(true))
    };

    let button_style = if valid {
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Define your budget",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("$ ", theme::dim_style()), input]),
        Line::from(""),
        Line::from(Span::styled("  DEFINE BUDGET  ", button_style)),
    ];

    if !state.budget.is_zero() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Current budget {}. Esc keeps it",
                format_amount(state.budget)
            ),
            theme::dim_style(),
        )));
    }

    let popup = centered_rect(48, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(true));
    f.render_widget(Paragraph::new(lines).centered().block(block), popup);

    if app.input_mode == InputMode::Normal && !form.input.is_empty() {
        let width = form.input.chars().count() as u16 + 2;
        let x = popup.x + (popup.width.saturating_sub(width)) / 2 + width;
        f.set_cursor_position((x.min(popup.right().saturating_sub(2)), popup.y + 4));
    }
}
