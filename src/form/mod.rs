//! Validation for the budget and expense forms.
//!
//! Nothing here touches the store directly: a form either produces an
//! `Action` ready to dispatch or a `FormError` explaining why it cannot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Category, DraftExpense, Expense};
use crate::store::{Action, BudgetState, ModalState};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("All the fields are mandatory")]
    MissingFields,
    #[error("Budget limit reached!")]
    BudgetExceeded,
    #[error("Amount must be a number greater than zero with at most 2 decimals")]
    InvalidAmount,
    #[error("Invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Budget must be a number greater than zero")]
    InvalidBudget,
}

/// Parse a money amount: positive, at most two decimal places.
pub fn parse_amount(input: &str) -> Result<Decimal, FormError> {
    let amount = Decimal::from_str(input.trim()).map_err(|_| FormError::InvalidAmount)?;
    if amount <= Decimal::ZERO || amount.scale() > 2 {
        return Err(FormError::InvalidAmount);
    }
    Ok(amount.normalize())
}

pub fn parse_date(input: &str) -> Result<NaiveDate, FormError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| FormError::InvalidDate(input.into()))
}

/// Refuse a submission that would take the remaining budget below zero.
///
/// `previous` is the amount the expense had before editing (zero for a new one),
/// so only the difference counts against what is left.
pub fn check_budget(candidate: Decimal, previous: Decimal, remaining: Decimal) -> Result<(), FormError> {
    if candidate - previous > remaining {
        return Err(FormError::BudgetExceeded);
    }
    Ok(())
}

// ── Budget form ───────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    pub input: String,
}

impl BudgetForm {
    pub fn parse(&self) -> Result<Decimal, FormError> {
        let budget = Decimal::from_str(self.input.trim()).map_err(|_| FormError::InvalidBudget)?;
        if budget <= Decimal::ZERO {
            return Err(FormError::InvalidBudget);
        }
        Ok(budget.normalize())
    }

    /// Mirrors the disabled state of the submit button.
    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }

    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.input.contains('.')) {
            self.input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Build the action and clear the input.
    pub fn submit(&mut self) -> Result<Action, FormError> {
        let budget = self.parse()?;
        self.input.clear();
        Ok(Action::AddBudget { budget })
    }
}

// ── Expense form ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Amount,
    Category,
    Date,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[Self::Name, Self::Amount, Self::Category, Self::Date]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name of Expense",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "e.g., Groceries",
            Self::Amount => "e.g., 50",
            Self::Category => "-- Select a category --",
            Self::Date => "YYYY-MM-DD",
        }
    }

    fn step(&self, delta: isize) -> Field {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0) as isize;
        let len = all.len() as isize;
        all[(idx + delta).rem_euclid(len) as usize]
    }
}

/// Text-field state of the expense modal.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    /// Index into `CATEGORIES`; `None` until the user picks one.
    pub category: Option<usize>,
    pub date: String,
    pub field: Field,
    /// Set when the form was opened on an existing expense.
    pub editing: Option<Expense>,
}

impl ExpenseForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            category: None,
            date: today.format(DATE_FORMAT).to_string(),
            field: Field::Name,
            editing: None,
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            name: expense.expense_name.clone(),
            amount: expense.amount.to_string(),
            category: Category::index_of(&expense.category),
            date: expense.date.format(DATE_FORMAT).to_string(),
            field: Field::Name,
            editing: Some(expense.clone()),
        }
    }

    /// Form matching what the store says the modal is doing.
    pub fn for_state(state: &BudgetState, today: NaiveDate) -> Self {
        match state.modal_state() {
            ModalState::Edit(_) => state
                .editing_expense()
                .map(Self::from_expense)
                .unwrap_or_else(|| Self::blank(today)),
            ModalState::New | ModalState::Closed => Self::blank(today),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Expense"
        } else {
            "New Expense"
        }
    }

    pub fn selected_category(&self) -> Option<&'static Category> {
        self.category.and_then(|i| Category::all().get(i))
    }

    pub fn set_category(&mut self, input: &str) -> Result<(), FormError> {
        let cat = Category::lookup(input).ok_or_else(|| FormError::UnknownCategory(input.into()))?;
        self.category = Category::index_of(cat.id);
        Ok(())
    }

    pub fn next_field(&mut self) {
        self.field = self.field.step(1);
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.step(-1);
    }

    pub fn cycle_category(&mut self, delta: isize) {
        let len = Category::all().len() as isize;
        self.category = Some(match self.category {
            Some(i) => (i as isize + delta).rem_euclid(len) as usize,
            None if delta >= 0 => 0,
            None => (len - 1) as usize,
        });
    }

    pub fn push(&mut self, c: char) {
        match self.field {
            Field::Name => self.name.push(c),
            Field::Amount => {
                if c.is_ascii_digit() || (c == '.' && !self.amount.contains('.')) {
                    self.amount.push(c);
                }
            }
            Field::Date => {
                if c.is_ascii_digit() || c == '-' {
                    self.date.push(c);
                }
            }
            Field::Category => {}
        }
    }

    pub fn pop(&mut self) {
        match self.field {
            Field::Name => {
                self.name.pop();
            }
            Field::Amount => {
                self.amount.pop();
            }
            Field::Date => {
                self.date.pop();
            }
            Field::Category => self.category = None,
        }
    }

    /// Check the fields in isolation and build a draft.
    pub fn draft(&self) -> Result<DraftExpense, FormError> {
        let category = self.selected_category();
        if self.name.trim().is_empty()
            || self.amount.trim().is_empty()
            || self.date.trim().is_empty()
            || category.is_none()
        {
            return Err(FormError::MissingFields);
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        let category = category.map(|c| c.id.to_string()).unwrap_or_default();
        Ok(DraftExpense {
            expense_name: self.name.trim().to_string(),
            amount,
            category,
            date,
        })
    }

    /// Validate against the current state and produce the action to dispatch:
    /// `UpdateExpense` when the store is editing, `AddExpense` otherwise.
    ///
    /// An edit whose expense has since been removed still yields
    /// `UpdateExpense`, so the store reports it as not found.
    pub fn submit(&self, state: &BudgetState) -> Result<Action, FormError> {
        let draft = self.draft()?;
        match state.modal_state() {
            ModalState::Edit(id) => {
                let Some(existing) = state.find_expense(id) else {
                    return Ok(Action::UpdateExpense {
                        expense: Expense::new(id, draft),
                    });
                };
                check_budget(draft.amount, existing.amount, state.remaining_budget())?;
                Ok(Action::UpdateExpense {
                    expense: existing.with_draft(draft),
                })
            }
            ModalState::New | ModalState::Closed => {
                check_budget(draft.amount, Decimal::ZERO, state.remaining_budget())?;
                Ok(Action::AddExpense { expense: draft })
            }
        }
    }
}

#[cfg(test)]
mod tests;
