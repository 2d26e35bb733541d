//! Display formatting for terminal output

pub mod expense;

pub use expense::{format_day, format_expense_details, format_expense_table, DisplayOptions};
