use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{DraftExpense, Expense};

/// Every change to `BudgetState` goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddBudget { budget: Decimal },
    ShowModal,
    CloseModal,
    AddExpense { expense: DraftExpense },
    RemoveExpense { id: Uuid },
    GetExpenseById { id: Uuid },
    UpdateExpense { expense: Expense },
    SetCategoryFilter { category: Option<String> },
    ResetApp,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBudget { .. } => "add-budget",
            Self::ShowModal => "show-modal",
            Self::CloseModal => "close-modal",
            Self::AddExpense { .. } => "add-expense",
            Self::RemoveExpense { .. } => "remove-expense",
            Self::GetExpenseById { .. } => "get-expense-by-id",
            Self::UpdateExpense { .. } => "update-expense",
            Self::SetCategoryFilter { .. } => "set-category-filter",
            Self::ResetApp => "reset-app",
        }
    }
}

/// What the expense form is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    New,
    Edit(Uuid),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetState {
    pub budget: Decimal,
    pub expenses: Vec<Expense>,
    pub modal: bool,
    pub editing_id: Option<Uuid>,
    pub current_category: Option<String>,
}

impl BudgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Budget minus everything spent. Recomputed on every call.
    pub fn remaining_budget(&self) -> Decimal {
        self.budget - self.total_spent()
    }

    /// Share of the budget already spent, in percent. Zero while no budget is set.
    pub fn spent_percentage(&self) -> Decimal {
        if self.budget <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.total_spent() / self.budget * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Expenses in the active category filter, or all of them when no filter is set.
    pub fn filtered_expenses(&self) -> Vec<&Expense> {
        match &self.current_category {
            Some(category) => self
                .expenses
                .iter()
                .filter(|e| &e.category == category)
                .collect(),
            None => self.expenses.iter().collect(),
        }
    }

    pub fn find_expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn editing_expense(&self) -> Option<&Expense> {
        self.editing_id.and_then(|id| self.find_expense(id))
    }

    pub fn modal_state(&self) -> ModalState {
        match (self.modal, self.editing_id) {
            (false, _) => ModalState::Closed,
            (true, None) => ModalState::New,
            (true, Some(id)) => ModalState::Edit(id),
        }
    }
}

/// Produce the next state for `action`. The input state is left untouched.
///
/// `RemoveExpense` and `UpdateExpense` with an ID that matches nothing leave
/// the expense list as it was.
pub fn transition(state: &BudgetState, action: Action) -> BudgetState {
    match action {
        Action::AddBudget { budget } => BudgetState {
            budget,
            ..state.clone()
        },
        Action::ShowModal => BudgetState {
            modal: true,
            ..state.clone()
        },
        Action::CloseModal => BudgetState {
            modal: false,
            editing_id: None,
            ..state.clone()
        },
        Action::AddExpense { expense } => {
            let mut expenses = state.expenses.clone();
            expenses.push(Expense::from_draft(expense));
            BudgetState {
                expenses,
                modal: false,
                ..state.clone()
            }
        }
        Action::RemoveExpense { id } => BudgetState {
            expenses: state
                .expenses
                .iter()
                .filter(|e| e.id != id)
                .cloned()
                .collect(),
            ..state.clone()
        },
        Action::GetExpenseById { id } => BudgetState {
            editing_id: Some(id),
            modal: true,
            ..state.clone()
        },
        Action::UpdateExpense { expense } => {
            let mut expenses = state.expenses.clone();
            if let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) {
                *slot = expense;
            }
            BudgetState {
                expenses,
                modal: false,
                editing_id: None,
                ..state.clone()
            }
        }
        Action::SetCategoryFilter { category } => BudgetState {
            current_category: category,
            ..state.clone()
        },
        Action::ResetApp => BudgetState::new(),
    }
}

/// Whether a dispatched action found its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The action referenced an expense ID that is not in the list.
    NotFound,
}

/// Owns the single `BudgetState` and is the only place it gets replaced.
#[derive(Debug, Default)]
pub struct Store {
    state: BudgetState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn remaining_budget(&self) -> Decimal {
        self.state.remaining_budget()
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = match &action {
            Action::RemoveExpense { id } | Action::GetExpenseById { id } => {
                self.lookup_outcome(*id)
            }
            Action::UpdateExpense { expense } => self.lookup_outcome(expense.id),
            _ => Outcome::Applied,
        };

        let name = action.name();
        if outcome == Outcome::NotFound {
            log::warn!("{name}: no expense with that id, expenses unchanged");
        }
        self.state = transition(&self.state, action);
        log::debug!(
            "{name}: budget={} expenses={} remaining={} modal={:?}",
            self.state.budget,
            self.state.expenses.len(),
            self.state.remaining_budget(),
            self.state.modal_state(),
        );
        outcome
    }

    fn lookup_outcome(&self, id: Uuid) -> Outcome {
        if self.state.find_expense(id).is_some() {
            Outcome::Applied
        } else {
            Outcome::NotFound
        }
    }
}
