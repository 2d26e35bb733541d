//! expense-calendar - personal expense ledger
//!
//! Records dated, categorised expenses and one spending budget per calendar
//! month, and derives the views a calendar front end needs: per-day and
//! per-month totals, budget status, and a category breakdown.
//!
//! # Architecture
//!
//! - `models`: expenses, budgets, categories, money and month helpers
//! - `ledger`: the in-memory store, its queries and change notification
//! - `storage`: snapshot backends and the autosaving `PersistentLedger`
//! - `reports`: budget status, category breakdown, calendar grid
//! - `audit`: JSON-lines log of every change
//! - `config`: data directory and user settings
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_calendar::ledger::Ledger;
//! use expense_calendar::models::{Expense, ExpenseCategory, Money, MonthlyBudget};
//!
//! let mut ledger = Ledger::new();
//! ledger.add_expense(Expense::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//!     "Groceries",
//!     Money::from_units(50),
//!     ExpenseCategory::Food,
//! ));
//! ledger.set_budget(MonthlyBudget::new(Money::from_units(500), 2, 2024));
//!
//! assert_eq!(ledger.total_expenses(2, 2024), Money::from_units(50));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber, once.
///
/// Logs go to stderr. The filter comes from `RUST_LOG`, defaulting to
/// `expense_calendar=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_calendar=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
