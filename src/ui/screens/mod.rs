pub(crate) mod budget_form;
pub(crate) mod expense_form;
pub(crate) mod expenses;
pub(crate) mod tracker;
