#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn make_draft(name: &str) -> DraftExpense {
    DraftExpense {
        expense_name: name.into(),
        amount: dec!(50),
        category: "2".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_categories_fixed_set() {
    let all = Category::all();
    assert_eq!(all.len(), 9);
    assert_eq!(all[0].name, "Savings");
    assert_eq!(all[8].name, "Other");
}

#[test]
fn test_category_ids_unique() {
    let all = Category::all();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a.id, b.id);
        }
    }
}

#[test]
fn test_category_find_by_id() {
    assert_eq!(Category::find_by_id("2").unwrap().name, "Food");
    assert_eq!(Category::find_by_id("9").unwrap().icon, "other");
    assert!(Category::find_by_id("10").is_none());
    assert!(Category::find_by_id("").is_none());
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    assert_eq!(Category::find_by_name("food").unwrap().id, "2");
    assert_eq!(Category::find_by_name("TRANSPORT").unwrap().id, "7");
    assert!(Category::find_by_name("Groceries").is_none());
}

#[test]
fn test_category_lookup_id_or_name() {
    assert_eq!(Category::lookup("3").unwrap().name, "House");
    assert_eq!(Category::lookup(" health ").unwrap().id, "5");
    assert!(Category::lookup("nope").is_none());
}

#[test]
fn test_category_index_of() {
    assert_eq!(Category::index_of("1"), Some(0));
    assert_eq!(Category::index_of("9"), Some(8));
    assert_eq!(Category::index_of("x"), None);
}

#[test]
fn test_category_glyphs_single_char() {
    for cat in Category::all() {
        assert_eq!(cat.glyph().chars().count(), 1, "{}", cat.name);
    }
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::find_by_id("6").unwrap()), "Subscriptions");
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_from_draft_copies_fields() {
    let draft = make_draft("Groceries");
    let expense = Expense::from_draft(draft.clone());
    assert_eq!(expense.expense_name, "Groceries");
    assert_eq!(expense.amount, dec!(50));
    assert_eq!(expense.category, "2");
    assert_eq!(expense.date, draft.date);
}

#[test]
fn test_expense_from_draft_generates_distinct_ids() {
    let a = Expense::from_draft(make_draft("a"));
    let b = Expense::from_draft(make_draft("a"));
    assert_ne!(a.id, b.id);
}

#[test]
fn test_expense_with_draft_keeps_id() {
    let original = Expense::from_draft(make_draft("Rent"));
    let mut draft = make_draft("Rent (March)");
    draft.amount = dec!(80);
    let updated = original.with_draft(draft);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.expense_name, "Rent (March)");
    assert_eq!(updated.amount, dec!(80));
}

#[test]
fn test_expense_category_lookup() {
    let expense = Expense::from_draft(make_draft("Lunch"));
    assert_eq!(expense.category().unwrap().name, "Food");
}

#[test]
fn test_expense_short_id() {
    let expense = Expense::from_draft(make_draft("Lunch"));
    let short = expense.short_id();
    assert_eq!(short.len(), 8);
    assert!(expense.id.simple().to_string().starts_with(&short));
}
