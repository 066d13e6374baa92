use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::store::BudgetState;
use crate::ui::theme;
use crate::ui::util::{format_amount, ratio_color, spent_ratio};

/// Budget / Available / Spent cards plus the spent gauge.
pub(crate) fn render(f: &mut Frame, area: Rect, state: &BudgetState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let spent = state.total_spent();
    let remaining = state.remaining_budget();

    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    render_card(f, chunks[0], "Budget", state.budget, bold(theme::ACCENT));
    render_card(
        f,
        chunks[1],
        "Available",
        remaining,
        theme::available_style(remaining <= Decimal::ZERO),
    );
    render_card(f, chunks[2], "Spent", spent, bold(theme::PINK));
    render_gauge(f, chunks[3], state);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(format_amount(amount), style)),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_gauge(f: &mut Frame, area: Rect, state: &BudgetState) {
    let ratio = spent_ratio(state.total_spent(), state.budget);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style(false))
                .title(Span::styled(" Used ", theme::title_style())),
        )
        .gauge_style(Style::default().fg(ratio_color(ratio)).bg(theme::SURFACE))
        .ratio(ratio)
        .label(Span::styled(
            format!("{}%", state.spent_percentage().round_dp(0)),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, area);
}
