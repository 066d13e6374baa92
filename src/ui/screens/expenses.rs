use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::form::DATE_FORMAT;
use crate::models::Category;
use crate::store::BudgetState;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let expenses = state.filtered_expenses();
    let filter_name = state
        .current_category
        .as_deref()
        .and_then(Category::find_by_id)
        .map(|c| c.name);

    if expenses.is_empty() {
        let hint = match filter_name {
            Some(name) => format!("Nothing in {name}. Press 0 to show every category"),
            None => "Press n to add one, or :add <amount> <category> <name>".into(),
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet...", theme::title_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(false))
            .title(Span::styled(" Expenses List (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["#", "ID", "Date", "Expense", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let category = expense
                .category()
                .map(|c| format!("{} {}", c.glyph(), c.name))
                .unwrap_or_else(|| "—".into());

            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(expense.short_id()),
                Cell::from(expense.date.format(DATE_FORMAT).to_string()),
                Cell::from(truncate(&expense.expense_name, 40)),
                Cell::from(category),
                Cell::from(format_amount(expense.amount)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(17),
        Constraint::Length(14),
    ];

    let title = match filter_name {
        Some(name) => format!(" Expenses List ({}) in {name} ", expenses.len()),
        None => format!(" Expenses List ({}) ", expenses.len()),
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(true))
            .title(Span::styled(title, theme::title_style())),
    );

    f.render_widget(table, area);
}
