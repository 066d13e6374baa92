use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::form::Field;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::centered_rect;

/// The expense modal, drawn over whatever screen is active.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.expense_form;

    let mut lines = vec![Line::from("")];
    for field in Field::all() {
        let active = *field == form.field;
        let value = match field {
            Field::Name => form.name.clone(),
            Field::Amount => form.amount.clone(),
            Field::Date => form.date.clone(),
            Field::Category => form
                .selected_category()
                .map(|c| format!("◂ {} {} ▸", c.glyph(), c.name))
                .unwrap_or_default(),
        };

        let label_style = if active {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        let value_span = if value.is_empty() {
            Span::styled(format!(" {:<28}", field.placeholder()), theme::dim_style())
        } else {
            Span::styled(format!(" {value:<28}"), theme::input_style(active))
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:>16}: ", field.label()), label_style),
            value_span,
        ]));
        lines.push(Line::from(""));
    }

    match &app.form_error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("  {err}"),
            theme::error_style(),
        ))),
        None => lines.push(Line::from(Span::styled(
            if form.editing.is_some() {
                "  Enter saves changes, Esc discards them"
            } else {
                "  Enter registers the expense, Esc closes"
            },
            theme::dim_style(),
        ))),
    }

    let popup = centered_rect(56, lines.len() as u16 + 2, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::PINK))
        .style(Style::default().bg(theme::HEADER_BG))
        .title(Span::styled(
            format!(" {} ", form.title().to_uppercase()),
            Style::default()
                .fg(theme::PINK)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), popup);

    if form.field != Field::Category {
        let typed = match form.field {
            Field::Name => form.name.chars().count(),
            Field::Amount => form.amount.chars().count(),
            _ => form.date.chars().count(),
        } as u16;
        let row = Field::all()
            .iter()
            .position(|field| *field == form.field)
            .unwrap_or(0) as u16;
        // border + blank line, then two lines per field; label column is 20 wide
        let x = popup.x + 1 + 20 + 1 + typed;
        let y = popup.y + 2 + row * 2;
        if x < popup.right() && y < popup.bottom() {
            f.set_cursor_position((x, y));
        }
    }
}
