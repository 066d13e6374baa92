mod category;
mod expense;

pub use category::Category;
pub use expense::{DraftExpense, Expense};

#[cfg(test)]
mod tests;
