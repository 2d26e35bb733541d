//! Audit trail for ledger changes
//!
//! Each ledger event becomes one typed [`AuditRecord`] in a JSON-lines file.
//! Records carry the expense or budget itself, so the history of a removed
//! expense can still be read back.
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_calendar::audit::{AuditLog, AuditObserver};
//! use expense_calendar::ledger::Ledger;
//!
//! let mut ledger = Ledger::new();
//! ledger.subscribe(AuditObserver::new(AuditLog::new("audit.log".into())));
//! ```

mod log;
mod observer;
mod record;

pub use log::AuditLog;
pub use observer::AuditObserver;
pub use record::{describe_expense_changes, AuditRecord, LedgerChange};
