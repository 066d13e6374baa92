#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal_macros::dec;

use super::*;
use crate::store::{Outcome, Store};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn filled(name: &str, amount: &str, category: &str) -> ExpenseForm {
    let mut form = ExpenseForm::blank(today());
    form.name = name.into();
    form.amount = amount.into();
    form.set_category(category).unwrap();
    form
}

fn store_with_budget(budget: Decimal) -> Store {
    let mut store = Store::new();
    store.dispatch(Action::AddBudget { budget });
    store
}

// ── parse helpers ─────────────────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("50").unwrap(), dec!(50));
    assert_eq!(parse_amount(" 4.50 ").unwrap(), dec!(4.5));
    assert_eq!(parse_amount("0.01").unwrap(), dec!(0.01));
}

#[test]
fn test_parse_amount_rejects() {
    assert_eq!(parse_amount("0"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount("-5"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount("abc"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount("1.005"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount(""), Err(FormError::InvalidAmount));
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2024-05-20").unwrap(), today());
    assert!(matches!(parse_date("20/05/2024"), Err(FormError::InvalidDate(_))));
    assert!(matches!(parse_date("2024-02-30"), Err(FormError::InvalidDate(_))));
}

#[test]
fn test_check_budget() {
    assert!(check_budget(dec!(50), dec!(0), dec!(50)).is_ok());
    assert_eq!(
        check_budget(dec!(50.01), dec!(0), dec!(50)),
        Err(FormError::BudgetExceeded)
    );
    // Editing counts only the difference against what is left
    assert!(check_budget(dec!(80), dec!(50), dec!(30)).is_ok());
    assert_eq!(
        check_budget(dec!(81), dec!(50), dec!(30)),
        Err(FormError::BudgetExceeded)
    );
    // Lowering an amount is always allowed
    assert!(check_budget(dec!(10), dec!(50), dec!(0)).is_ok());
}

#[test]
fn test_error_messages() {
    assert_eq!(FormError::MissingFields.to_string(), "All the fields are mandatory");
    assert_eq!(FormError::BudgetExceeded.to_string(), "Budget limit reached!");
}

// ── BudgetForm ────────────────────────────────────────────────

#[test]
fn test_budget_form_valid() {
    let mut form = BudgetForm::default();
    for c in "300".chars() {
        form.push(c);
    }
    assert!(form.is_valid());
    assert_eq!(form.submit().unwrap(), Action::AddBudget { budget: dec!(300) });
    assert!(form.input.is_empty());
}

#[test]
fn test_budget_form_rejects_zero_and_empty() {
    let mut form = BudgetForm::default();
    assert!(!form.is_valid());
    assert_eq!(form.submit(), Err(FormError::InvalidBudget));
    form.input = "0".into();
    assert!(!form.is_valid());
    form.input = "0.00".into();
    assert_eq!(form.parse(), Err(FormError::InvalidBudget));
}

#[test]
fn test_budget_form_filters_input() {
    let mut form = BudgetForm::default();
    for c in "1a2.5.0-".chars() {
        form.push(c);
    }
    assert_eq!(form.input, "12.50");
    form.pop();
    assert_eq!(form.input, "12.5");
}

#[test]
fn test_budget_form_failed_submit_keeps_input() {
    let mut form = BudgetForm { input: "0".into() };
    assert!(form.submit().is_err());
    assert_eq!(form.input, "0");
}

// ── ExpenseForm ───────────────────────────────────────────────

#[test]
fn test_blank_form_defaults() {
    let form = ExpenseForm::blank(today());
    assert_eq!(form.date, "2024-05-20");
    assert_eq!(form.field, Field::Name);
    assert!(form.category.is_none());
    assert_eq!(form.title(), "New Expense");
}

#[test]
fn test_missing_fields() {
    let store = store_with_budget(dec!(100));
    let mut form = ExpenseForm::blank(today());
    assert_eq!(form.submit(store.state()), Err(FormError::MissingFields));

    form.name = "Lunch".into();
    form.amount = "10".into();
    assert_eq!(form.submit(store.state()), Err(FormError::MissingFields));

    form.cycle_category(1);
    form.name = "   ".into();
    assert_eq!(form.submit(store.state()), Err(FormError::MissingFields));
}

#[test]
fn test_submit_new_expense() {
    let store = store_with_budget(dec!(100));
    let form = filled(" Lunch ", "10", "food");
    match form.submit(store.state()).unwrap() {
        Action::AddExpense { expense } => {
            assert_eq!(expense.expense_name, "Lunch");
            assert_eq!(expense.amount, dec!(10));
            assert_eq!(expense.category, "2");
            assert_eq!(expense.date, today());
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn test_submit_over_budget() {
    let store = store_with_budget(dec!(100));
    let form = filled("TV", "100.01", "4");
    assert_eq!(form.submit(store.state()), Err(FormError::BudgetExceeded));
    let form = filled("TV", "100", "4");
    assert!(form.submit(store.state()).is_ok());
}

#[test]
fn test_submit_invalid_amount_and_date() {
    let store = store_with_budget(dec!(100));
    let form = filled("TV", "0", "4");
    assert_eq!(form.submit(store.state()), Err(FormError::InvalidAmount));
    let mut form = filled("TV", "5", "4");
    form.date = "2024-13-01".into();
    assert!(matches!(form.submit(store.state()), Err(FormError::InvalidDate(_))));
}

#[test]
fn test_submit_edit_produces_update() {
    let mut store = store_with_budget(dec!(300));
    let draft = filled("Groceries", "50", "2").draft().unwrap();
    store.dispatch(Action::AddExpense { expense: draft });
    let id = store.state().expenses[0].id;
    store.dispatch(Action::GetExpenseById { id });

    let mut form = ExpenseForm::for_state(store.state(), today());
    assert_eq!(form.title(), "Edit Expense");
    assert_eq!(form.name, "Groceries");
    assert_eq!(form.amount, "50");
    assert_eq!(form.selected_category().unwrap().id, "2");

    form.amount = "80".into();
    match form.submit(store.state()).unwrap() {
        Action::UpdateExpense { expense } => {
            assert_eq!(expense.id, id);
            assert_eq!(expense.amount, dec!(80));
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn test_submit_edit_of_missing_expense_stays_an_update() {
    let mut store = store_with_budget(dec!(300));
    let draft = filled("Groceries", "50", "2").draft().unwrap();
    store.dispatch(Action::AddExpense { expense: draft });
    let id = store.state().expenses[0].id;
    store.dispatch(Action::GetExpenseById { id });
    let form = ExpenseForm::for_state(store.state(), today());
    store.dispatch(Action::RemoveExpense { id });

    let action = form.submit(store.state()).unwrap();
    match &action {
        Action::UpdateExpense { expense } => assert_eq!(expense.id, id),
        other => panic!("unexpected action {other:?}"),
    }
    assert_eq!(store.dispatch(action), Outcome::NotFound);
    assert!(store.state().expenses.is_empty());
}

#[test]
fn test_edit_budget_check_uses_previous_amount() {
    let mut store = store_with_budget(dec!(100));
    let draft = filled("Rent", "90", "3").draft().unwrap();
    store.dispatch(Action::AddExpense { expense: draft });
    let id = store.state().expenses[0].id;
    store.dispatch(Action::GetExpenseById { id });

    let mut form = ExpenseForm::for_state(store.state(), today());
    form.amount = "100".into();
    assert!(form.submit(store.state()).is_ok());
    form.amount = "100.5".into();
    assert_eq!(form.submit(store.state()), Err(FormError::BudgetExceeded));
}

#[test]
fn test_for_state_new_is_blank() {
    let mut store = store_with_budget(dec!(100));
    store.dispatch(Action::ShowModal);
    let form = ExpenseForm::for_state(store.state(), today());
    assert!(form.editing.is_none());
    assert!(form.name.is_empty());
}

#[test]
fn test_field_navigation_wraps() {
    let mut form = ExpenseForm::blank(today());
    form.prev_field();
    assert_eq!(form.field, Field::Date);
    form.next_field();
    assert_eq!(form.field, Field::Name);
    form.next_field();
    form.next_field();
    assert_eq!(form.field, Field::Category);
}

#[test]
fn test_cycle_category_wraps() {
    let mut form = ExpenseForm::blank(today());
    form.cycle_category(-1);
    assert_eq!(form.selected_category().unwrap().name, "Other");
    form.cycle_category(1);
    assert_eq!(form.selected_category().unwrap().name, "Savings");
    form.cycle_category(1);
    assert_eq!(form.selected_category().unwrap().name, "Food");
}

#[test]
fn test_typing_filters_by_field() {
    let mut form = ExpenseForm::blank(today());
    form.date.clear();
    for c in "Tea".chars() {
        form.push(c);
    }
    form.field = Field::Amount;
    for c in "3x.5.0".chars() {
        form.push(c);
    }
    form.field = Field::Date;
    for c in "2024/01-02".chars() {
        form.push(c);
    }
    assert_eq!(form.name, "Tea");
    assert_eq!(form.amount, "3.50");
    assert_eq!(form.date, "202401-02");
}

#[test]
fn test_backspace_on_category_clears_it() {
    let mut form = filled("Tea", "3", "2");
    form.field = Field::Category;
    form.pop();
    assert!(form.category.is_none());
}

#[test]
fn test_set_unknown_category() {
    let mut form = ExpenseForm::blank(today());
    assert_eq!(
        form.set_category("Groceries"),
        Err(FormError::UnknownCategory("Groceries".into()))
    );
}
