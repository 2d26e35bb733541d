//! Core data models for the expense ledger
//!
//! Plain data shapes: expenses, monthly budgets, the fixed category set, and
//! the money and month helpers they are built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use budget::MonthlyBudget;
pub use category::{ExpenseCategory, UnknownCategory};
pub use expense::{parse_calendar_date, Expense, ExpensePatch, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{MonthParseError, MonthRef};
