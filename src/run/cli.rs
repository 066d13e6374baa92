use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Category;
use crate::store::{BudgetState, Store};
use crate::ui::app::App;
use crate::ui::commands::{awaiting_confirmation, handle_command};
use crate::ui::util::{format_amount, progress_bar, spent_ratio, truncate};

pub(crate) fn as_cli(args: &[String], store: &mut Store) -> Result<()> {
    match args[1].as_str() {
        "run" | "r" => cli_run(&args[2..], store),
        "categories" | "c" => {
            cli_categories();
            Ok(())
        }
        "--budget" | "-b" => cli_budget(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetform {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetForm - in-memory budget and expense tracker");
    println!();
    println!("Usage: budgetform [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  --budget, -b <amount>         Launch the TUI with a budget already defined");
    println!("  run <script>                  Run a file of commands, then print a summary");
    println!("  categories                    List the expense categories");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Script lines use the command bar syntax without the leading ':',");
    println!("e.g. 'budget 300' or 'add 50 food Groceries'. Blank lines and lines");
    println!("starting with '#' are skipped. Deletes and resets are confirmed.");
    println!();
    println!("Logs go to budgetform.log in the data directory; set BUDGETFORM_LOG to");
    println!("change the level (default: info).");
}

fn cli_budget(args: &[String], store: &mut Store) -> Result<()> {
    let Some(amount) = args.first() else {
        anyhow::bail!("Usage: budgetform --budget <amount>");
    };
    let mut app = App::new(store.state());
    handle_command(&format!("budget {amount}"), &mut app, store)?;
    if store.state().budget.is_zero() {
        anyhow::bail!("{}", app.status_message);
    }
    super::as_tui(store)
}

fn cli_run(args: &[String], store: &mut Store) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: budgetform run <script>");
    };
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;

    let lines = run_script(&script, store)?;
    for line in &lines {
        println!("{line}");
    }
    println!();
    print_summary(store.state());
    Ok(())
}

/// Execute each command line against `store`, collecting one status line per
/// command. Pending confirmations are accepted.
pub(crate) fn run_script(script: &str, store: &mut Store) -> Result<Vec<String>> {
    let mut app = App::new(store.state());
    let mut output = Vec::new();

    for (lineno, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix(':').unwrap_or(line);

        app.status_message.clear();
        handle_command(line, &mut app, store)
            .with_context(|| format!("line {}: {line}", lineno + 1))?;
        if awaiting_confirmation(&app) {
            log::debug!("auto-confirming: {}", app.confirm_message);
            app.confirm_pending(store);
        }
        if !app.status_message.is_empty() {
            output.push(format!("{:>3}: {}", lineno + 1, app.status_message));
        }
        if !app.running {
            break;
        }
    }
    log::info!("script finished with {} expenses", store.state().expenses.len());
    Ok(output)
}

fn print_summary(state: &BudgetState) {
    println!("BudgetForm");
    println!("{}", "─".repeat(56));
    println!("  Budget:     {}", format_amount(state.budget));
    println!("  Spent:      {}", format_amount(state.total_spent()));
    println!("  Available:  {}", format_amount(state.remaining_budget()));
    println!(
        "  Used:       {} {}%",
        progress_bar(spent_ratio(state.total_spent(), state.budget), 20),
        state.spent_percentage()
    );

    if let Some(cat) = state.current_category.as_deref().and_then(Category::find_by_id) {
        println!("  Filter:     {}", cat.name);
    }

    let expenses = state.filtered_expenses();
    println!();
    if expenses.is_empty() {
        println!("No expenses yet...");
        return;
    }

    println!(
        "{:<4} {:<10} {:<24} {:<14} {:>10}",
        "#", "Date", "Expense", "Category", "Amount"
    );
    println!("{}", "─".repeat(66));
    for (i, expense) in expenses.iter().enumerate() {
        let category = expense.category().map_or("?", |c| c.name);
        println!(
            "{:<4} {:<10} {:<24} {:<14} {:>10}",
            i + 1,
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.expense_name, 24),
            category,
            format_amount(expense.amount),
        );
    }
}

fn cli_categories() {
    println!("{:<4} {:<14} Icon", "ID", "Name");
    println!("{}", "─".repeat(30));
    for cat in Category::all() {
        println!("{:<4} {:<14} {}", cat.id, cat.name, cat.icon);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_run_script_edit_scenario() {
        let mut store = Store::new();
        let script = "\
# monthly budget
budget 300

add 50 food Groceries 2024-01-15
edit 1
set amount 80
save
";
        let lines = run_script(script, &mut store).unwrap();
        assert_eq!(store.remaining_budget(), dec!(220));
        assert_eq!(store.state().expenses.len(), 1);
        assert!(lines[0].ends_with("Budget set to $300.00"));
        assert!(lines.last().unwrap().ends_with("Updated: Groceries"));
    }

    #[test]
    fn test_run_script_confirms_deletes() {
        let mut store = Store::new();
        let script = ":budget 100\n:add 10 2 Lunch\n:delete 1\n";
        let lines = run_script(script, &mut store).unwrap();
        assert!(store.state().expenses.is_empty());
        assert!(lines.last().unwrap().ends_with("Deleted: Lunch"));
    }

    #[test]
    fn test_run_script_keeps_edited_expense_until_saved() {
        let mut store = Store::new();
        let script = "\
budget 300
add 50 food Groceries
edit 1
delete 1
set name Groceries
set amount 80
set category food
save
";
        let lines = run_script(script, &mut store).unwrap();
        assert_eq!(store.state().expenses.len(), 1);
        assert_eq!(store.state().expenses[0].amount, dec!(80));
        assert!(lines
            .iter()
            .any(|l| l == "  4: An expense form is open. Use :save or :cancel first"));
        assert!(lines.last().unwrap().ends_with("Updated: Groceries"));
    }

    #[test]
    fn test_run_script_reports_rejections() {
        let mut store = Store::new();
        let lines = run_script("budget 100\nadd 150 3 Rent\n", &mut store).unwrap();
        assert!(store.state().expenses.is_empty());
        assert!(lines[1].ends_with("Budget limit reached!"));
    }

    #[test]
    fn test_run_script_stops_on_quit() {
        let mut store = Store::new();
        run_script("budget 100\nq\nadd 10 2 Lunch\n", &mut store).unwrap();
        assert!(store.state().expenses.is_empty());
    }

    #[test]
    fn test_cli_run_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "budget 500").unwrap();
        writeln!(file, "add 25.50 food Pizza").unwrap();
        let mut store = Store::new();
        let args = vec![file.path().display().to_string()];
        cli_run(&args, &mut store).unwrap();
        assert_eq!(store.remaining_budget(), dec!(474.50));
    }

    #[test]
    fn test_cli_run_missing_file() {
        let mut store = Store::new();
        let args = vec!["/nonexistent/budget-script.txt".to_string()];
        let err = cli_run(&args, &mut store).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_unknown_subcommand() {
        let mut store = Store::new();
        let args = vec!["budgetform".to_string(), "bogus".to_string()];
        assert!(as_cli(&args, &mut store).is_err());
    }
}
