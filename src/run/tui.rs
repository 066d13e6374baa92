use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::form::Field;
use crate::store::Store;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(store: &mut Store) -> Result<()> {
    let mut app = App::new(store.state());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    log::info!("terminal UI started");

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("terminal UI failed: {e:?}");
        eprintln!("Error: {e:?}");
    }
    log::info!(
        "terminal UI closed with {} expenses",
        store.state().expenses.len()
    );

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = f.area().height.saturating_sub(3) as usize;
            crate::ui::render::render(f, app, store.state());
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            handle_key(key, app, store)?;
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal if app.screen == Screen::BudgetForm => {
            handle_budget_form_input(key, app, store)
        }
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Form => {
            handle_form_input(key, app, store);
            Ok(())
        }
        InputMode::Confirm => {
            handle_confirm_input(key, app, store);
            Ok(())
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(store.state()),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.goto_top(),
        KeyCode::Char('G') => app.goto_bottom(store.state()),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.expense_page() / 2 {
                app.move_down(store.state());
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.expense_page() / 2 {
                app.move_up();
            }
        }
        KeyCode::Char('n') => app.open_new_expense(store),
        KeyCode::Char('e') | KeyCode::Enter => {
            match app.selected_expense(store.state()).map(|e| e.id) {
                Some(id) => app.open_edit_expense(store, id),
                None => app.set_status("No expense selected"),
            }
        }
        KeyCode::Char('D') | KeyCode::Delete => {
            match app.selected_expense(store.state()).cloned() {
                Some(expense) => app.request_delete(&expense),
                None => app.set_status("No expense selected"),
            }
        }
        KeyCode::Char('f') => app.cycle_filter(store, 1),
        KeyCode::Char('F') => app.cycle_filter(store, -1),
        KeyCode::Char('0') => app.set_filter(store, None),
        KeyCode::Char('B') => commands::handle_command("budget", app, store)?,
        KeyCode::Char('R') => app.request_reset(),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_budget_form_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_budget_form(store),
        KeyCode::Esc if !store.state().budget.is_zero() => {
            app.budget_form.input.clear();
            app.screen = Screen::Tracker;
            app.set_status("Budget unchanged");
        }
        KeyCode::Backspace => app.budget_form.pop(),
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char(c) => app.budget_form.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, store: &mut Store) {
    let on_category = app.expense_form.field == Field::Category;
    match key.code {
        KeyCode::Enter => app.submit_expense_form(store),
        KeyCode::Esc => app.close_expense_form(store),
        KeyCode::Tab | KeyCode::Down => app.expense_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.expense_form.prev_field(),
        KeyCode::Left if on_category => app.expense_form.cycle_category(-1),
        KeyCode::Right | KeyCode::Char(' ') if on_category => app.expense_form.cycle_category(1),
        KeyCode::Backspace => app.expense_form.pop(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.expense_form.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, store: &mut Store) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(store),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
        _ => {}
    }
}
