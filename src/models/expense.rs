use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Category;

/// An expense being composed in the form, before the store assigns an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftExpense {
    pub expense_name: String,
    pub amount: Decimal,
    /// ID of a `Category`.
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub expense_name: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(id: Uuid, draft: DraftExpense) -> Self {
        Self {
            id,
            expense_name: draft.expense_name,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
        }
    }

    /// Attach a freshly generated ID to a draft.
    pub fn from_draft(draft: DraftExpense) -> Self {
        Self::new(Uuid::new_v4(), draft)
    }

    /// Same record with its fields replaced by a draft. The ID is kept.
    pub fn with_draft(&self, draft: DraftExpense) -> Self {
        Self::new(self.id, draft)
    }

    pub fn category(&self) -> Option<&'static Category> {
        Category::find_by_id(&self.category)
    }

    /// First eight hex digits of the ID, enough to address an expense from the command bar.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
