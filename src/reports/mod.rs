//! Reports derived from the ledger
//!
//! Budget status for the header, the category breakdown chart, and the
//! month calendar grid. Each report is computed on demand from a `Ledger`
//! and can be formatted for the terminal.

pub mod budget_status;
pub mod calendar;
pub mod category_breakdown;

pub use budget_status::BudgetStatus;
pub use calendar::{CalendarDay, CalendarMonth, SpendIntensity};
pub use category_breakdown::{CategoryBreakdown, CategorySlice};
