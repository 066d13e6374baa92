use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::form::{BudgetForm, ExpenseForm, FormError};
use crate::models::{Category, Expense};
use crate::store::{Action, BudgetState, ModalState, Outcome, Store};

use super::util::{format_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    BudgetForm,
    Tracker,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BudgetForm => write!(f, "Budget"),
            Self::Tracker => write!(f, "Tracker"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: Uuid, name: String },
    ResetApp,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Forms
    pub(crate) budget_form: BudgetForm,
    pub(crate) expense_form: ExpenseForm,
    pub(crate) form_error: Option<FormError>,

    // Expense list (indexes into the filtered view)
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(state: &BudgetState) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Tracker,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            budget_form: BudgetForm::default(),
            expense_form: ExpenseForm::blank(today()),
            form_error: None,

            expense_index: 0,
            expense_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.sync(state);
        app
    }

    /// Dispatch into the store, then bring the UI in line with the new state.
    pub(crate) fn apply(&mut self, store: &mut Store, action: Action) -> Outcome {
        let outcome = store.dispatch(action);
        self.sync(store.state());
        outcome
    }

    /// Align screen, input mode, form contents and cursor with the store.
    pub(crate) fn sync(&mut self, state: &BudgetState) {
        if state.budget.is_zero() {
            self.screen = Screen::BudgetForm;
        }

        match state.modal_state() {
            ModalState::Closed => {
                if self.input_mode == InputMode::Form {
                    self.input_mode = InputMode::Normal;
                }
                self.form_error = None;
            }
            ModalState::New | ModalState::Edit(_) => {
                let target = state.editing_id;
                let current = self.expense_form.editing.as_ref().map(|e| e.id);
                if self.input_mode != InputMode::Form || target != current {
                    self.expense_form = ExpenseForm::for_state(state, today());
                    self.form_error = None;
                }
                self.screen = Screen::Tracker;
                self.input_mode = InputMode::Form;
            }
        }

        let len = state.filtered_expenses().len();
        if self.expense_index >= len {
            self.expense_index = len.saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn selected_expense<'a>(&self, state: &'a BudgetState) -> Option<&'a Expense> {
        state.filtered_expenses().get(self.expense_index).copied()
    }

    /// Resolve an expense reference typed in the command bar: empty means the
    /// selected row, a number of up to 6 digits is a 1-based row in the visible
    /// list, anything else is matched as an ID prefix.
    pub(crate) fn resolve_expense<'a>(
        &self,
        state: &'a BudgetState,
        reference: &str,
    ) -> Option<&'a Expense> {
        let reference = reference.trim();
        if reference.is_empty() {
            return self.selected_expense(state);
        }
        if reference.len() <= 6 {
            if let Ok(row) = reference.parse::<usize>() {
                return row
                    .checked_sub(1)
                    .and_then(|i| state.filtered_expenses().get(i).copied());
            }
        }
        let prefix = reference.to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return None;
        }
        let mut matches = state
            .expenses
            .iter()
            .filter(|e| e.id.simple().to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(expense), None) => Some(expense),
            _ => None,
        }
    }

    pub(crate) fn submit_budget_form(&mut self, store: &mut Store) {
        match self.budget_form.submit() {
            Ok(action) => {
                self.apply(store, action);
                self.screen = Screen::Tracker;
                self.set_status(format!(
                    "Budget set to {}",
                    format_amount(store.state().budget)
                ));
            }
            Err(e) => {
                log::info!("budget form rejected: {e}");
                self.set_status(e.to_string());
            }
        }
    }

    pub(crate) fn submit_expense_form(&mut self, store: &mut Store) {
        match self.expense_form.submit(store.state()) {
            Ok(action) => {
                let verb = match action {
                    Action::UpdateExpense { .. } => "Updated",
                    _ => "Added",
                };
                let name = self.expense_form.name.trim().to_string();
                if self.apply(store, action) == Outcome::NotFound {
                    self.set_status("That expense no longer exists");
                } else {
                    self.set_status(format!("{verb}: {name}"));
                }
            }
            Err(e) => {
                log::info!("expense form rejected: {e}");
                self.form_error = Some(e);
            }
        }
    }

    pub(crate) fn open_new_expense(&mut self, store: &mut Store) {
        if store.state().budget.is_zero() {
            self.set_status("Define a budget first");
            return;
        }
        self.apply(store, Action::ShowModal);
    }

    pub(crate) fn open_edit_expense(&mut self, store: &mut Store, id: Uuid) {
        self.apply(store, Action::GetExpenseById { id });
    }

    pub(crate) fn close_expense_form(&mut self, store: &mut Store) {
        self.apply(store, Action::CloseModal);
    }

    pub(crate) fn request_delete(&mut self, expense: &Expense) {
        self.confirm_message = format!("Delete '{}'?", expense.expense_name);
        self.pending_action = Some(PendingAction::DeleteExpense {
            id: expense.id,
            name: expense.expense_name.clone(),
        });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_reset(&mut self) {
        self.confirm_message = "Reset the app? Budget and all expenses will be cleared".into();
        self.pending_action = Some(PendingAction::ResetApp);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, store: &mut Store) {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        match self.pending_action.take() {
            Some(PendingAction::DeleteExpense { id, name }) => {
                match self.apply(store, Action::RemoveExpense { id }) {
                    Outcome::Applied => self.set_status(format!("Deleted: {name}")),
                    Outcome::NotFound => self.set_status(format!("'{name}' was already removed")),
                }
            }
            Some(PendingAction::ResetApp) => {
                self.apply(store, Action::ResetApp);
                self.budget_form = BudgetForm::default();
                self.expense_index = 0;
                self.expense_scroll = 0;
                self.set_status("App reset");
            }
            None => {}
        }
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Step the category filter through `None` and every category.
    pub(crate) fn cycle_filter(&mut self, store: &mut Store, delta: isize) {
        let cats = Category::all();
        let slots = cats.len() as isize + 1;
        let current = store
            .state()
            .current_category
            .as_deref()
            .and_then(Category::index_of)
            .map_or(0, |i| i as isize + 1);
        let next = (current + delta).rem_euclid(slots);
        let category = if next == 0 {
            None
        } else {
            cats.get(next as usize - 1).map(|c| c.id.to_string())
        };
        self.set_filter(store, category);
    }

    pub(crate) fn set_filter(&mut self, store: &mut Store, category: Option<String>) {
        let label = category
            .as_deref()
            .and_then(Category::find_by_id)
            .map(|c| c.name);
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.apply(store, Action::SetCategoryFilter { category });
        match label {
            Some(name) => self.set_status(format!("Filtering by: {name}")),
            None => self.set_status("Showing all categories"),
        }
    }

    pub(crate) fn move_down(&mut self, state: &BudgetState) {
        let page = self.expense_page();
        let len = state.filtered_expenses().len();
        scroll_down(&mut self.expense_index, &mut self.expense_scroll, len, page);
    }

    pub(crate) fn move_up(&mut self) {
        scroll_up(&mut self.expense_index, &mut self.expense_scroll);
    }

    pub(crate) fn goto_top(&mut self) {
        scroll_to_top(&mut self.expense_index, &mut self.expense_scroll);
    }

    pub(crate) fn goto_bottom(&mut self, state: &BudgetState) {
        let page = self.expense_page();
        let len = state.filtered_expenses().len();
        scroll_to_bottom(&mut self.expense_index, &mut self.expense_scroll, len, page);
    }

    /// Rows of the expense table that fit under the tracker cards: 7 rows of
    /// cards, then the table's two borders and header.
    pub(crate) fn expense_page(&self) -> usize {
        self.visible_rows.saturating_sub(10).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
