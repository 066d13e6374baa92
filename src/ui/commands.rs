use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{today, App, InputMode, Screen};
use crate::form::{parse_date, BudgetForm, ExpenseForm, Field};
use crate::models::Category;
use crate::store::Store;

use super::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetForm", cmd_quit, r);
    register_command!("quit", "Quit BudgetForm", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "budget",
        "Define the budget (e.g. :budget 300, no amount opens the form)",
        cmd_budget,
        r
    );
    register_command!("b", "Define the budget (e.g. :b 300)", cmd_budget, r);
    register_command!("new", "Open the new expense form", cmd_new, r);
    register_command!("n", "Open the new expense form", cmd_new, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 50 food Groceries [2024-01-15])",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 50 food Groceries)", cmd_add, r);
    register_command!(
        "edit",
        "Edit expense by row or id (selected when empty)",
        cmd_edit,
        r
    );
    register_command!("e", "Edit expense by row or id", cmd_edit, r);
    register_command!(
        "delete",
        "Delete expense by row or id (selected when empty)",
        cmd_delete,
        r
    );
    register_command!("del", "Delete expense by row or id", cmd_delete, r);
    register_command!(
        "set",
        "Set a field of the open form (e.g. :set amount 80)",
        cmd_set,
        r
    );
    register_command!("save", "Submit the open expense form", cmd_save, r);
    register_command!("cancel", "Close the open expense form", cmd_cancel, r);
    register_command!(
        "filter",
        "Filter by category (e.g. :filter food, empty clears)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter by category (e.g. :f food)", cmd_filter, r);
    register_command!("all", "Clear the category filter", cmd_clear_filter, r);
    register_command!(
        "categories",
        "List the expense categories",
        cmd_categories,
        r
    );
    register_command!("c", "List the expense categories", cmd_categories, r);
    register_command!(
        "reset",
        "Reset the app (clears budget and expenses)",
        cmd_reset,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        log::debug!("command :{cmd_name} {args}");
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn category_names() -> String {
    Category::all()
        .iter()
        .map(|c| format!("{}:{}", c.id, c.name))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Command implementations ──────────────────────────────────

const FORM_OPEN: &str = "An expense form is open. Use :save or :cancel first";

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if store.state().modal {
        app.set_status(FORM_OPEN);
        return Ok(());
    }
    if args.is_empty() {
        app.budget_form = BudgetForm {
            input: store.state().budget.to_string(),
        };
        app.screen = Screen::BudgetForm;
        app.set_status("Enter the new budget and press Enter");
        return Ok(());
    }

    app.budget_form = BudgetForm { input: args.into() };
    app.submit_budget_form(store);
    if !store.state().budget.is_zero() && store.remaining_budget().is_sign_negative() {
        app.set_status(format!(
            "Budget set to {}, already {} over",
            format_amount(store.state().budget),
            format_amount(store.remaining_budget().abs())
        ));
    }
    Ok(())
}

fn cmd_new(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.open_new_expense(store);
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <amount> <category> <name> [YYYY-MM-DD]";

    if store.state().budget.is_zero() {
        app.set_status("Define a budget first");
        return Ok(());
    }
    if store.state().modal {
        app.set_status(FORM_OPEN);
        return Ok(());
    }

    let mut parts = args.splitn(3, ' ');
    let (Some(amount), Some(category), Some(rest)) = (parts.next(), parts.next(), parts.next())
    else {
        app.set_status(USAGE);
        return Ok(());
    };

    let mut form = ExpenseForm::blank(today());
    form.amount = amount.to_string();
    if let Err(e) = form.set_category(category) {
        app.set_status(format!("{e}. Categories: {}", category_names()));
        return Ok(());
    }

    // A trailing date token is optional
    let rest = rest.trim();
    form.name = match rest.rsplit_once(' ') {
        Some((name, last)) if parse_date(last).is_ok() => {
            form.date = last.to_string();
            name.to_string()
        }
        _ => rest.to_string(),
    };

    match form.submit(store.state()) {
        Ok(action) => {
            app.apply(store, action);
            let added = store.state().expenses.last().map(|e| e.amount).unwrap_or_default();
            app.set_status(format!(
                "Added: {} {} ({} left)",
                form.name.trim(),
                format_amount(added),
                format_amount(store.remaining_budget())
            ));
        }
        Err(e) => {
            log::info!("add rejected: {e}");
            app.set_status(e.to_string());
        }
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some(id) = app.resolve_expense(store.state(), args).map(|e| e.id) else {
        app.set_status(format!("No expense matching '{args}'"));
        return Ok(());
    };
    app.open_edit_expense(store, id);
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if store.state().modal {
        app.set_status(FORM_OPEN);
        return Ok(());
    }
    match app.resolve_expense(store.state(), args).cloned() {
        Some(expense) => app.request_delete(&expense),
        None => app.set_status(format!("No expense matching '{args}'")),
    }
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !store.state().modal {
        app.set_status("No expense form open. Use :new or :edit first");
        return Ok(());
    }

    let (field, value) = args.split_once(' ').unwrap_or((args, ""));
    let value = value.trim();
    let form = &mut app.expense_form;
    match field.to_lowercase().as_str() {
        "name" => {
            form.field = Field::Name;
            form.name = value.to_string();
        }
        "amount" => {
            form.field = Field::Amount;
            form.amount = value.to_string();
        }
        "date" => {
            form.field = Field::Date;
            form.date = value.to_string();
        }
        "category" => {
            form.field = Field::Category;
            if let Err(e) = form.set_category(value) {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
        _ => {
            app.set_status("Usage: :set <name|amount|category|date> <value>");
            return Ok(());
        }
    }
    app.set_status(format!("{field} = {value}"));
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !store.state().modal {
        app.set_status("No expense form open");
        return Ok(());
    }
    app.submit_expense_form(store);
    if let Some(e) = &app.form_error {
        app.status_message = e.to_string();
    }
    Ok(())
}

fn cmd_cancel(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.close_expense_form(store);
    app.set_status("Form closed");
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_filter(store, None);
        return Ok(());
    }
    match Category::lookup(args) {
        Some(cat) => app.set_filter(store, Some(cat.id.to_string())),
        None => app.set_status(format!(
            "Category '{args}' not found. Categories: {}",
            category_names()
        )),
    }
    Ok(())
}

fn cmd_clear_filter(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.set_filter(store, None);
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.set_status(format!("Categories: {}", category_names()));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.request_reset();
    Ok(())
}

/// Whether the app is waiting on a y/N answer after a command.
pub(crate) fn awaiting_confirmation(app: &App) -> bool {
    app.input_mode == InputMode::Confirm && app.pending_action.is_some()
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
