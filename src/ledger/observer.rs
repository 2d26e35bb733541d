//! Change notification for the ledger
//!
//! Observers are called synchronously, in subscription order, after a
//! mutation has been committed. They receive the event and a shared view of
//! the updated ledger, so a view can re-query whatever it renders.

use std::fmt;

use super::store::Ledger;
use crate::models::{Expense, MonthlyBudget};

/// What changed in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    ExpenseAdded(Expense),
    ExpenseUpdated { before: Expense, after: Expense },
    ExpenseDeleted(Expense),
    BudgetSet {
        /// The budget that previously occupied the same `(month, year)` slot
        previous: Option<MonthlyBudget>,
        budget: MonthlyBudget,
    },
    /// Both collections were swapped wholesale (e.g. after loading from disk)
    Replaced,
}

impl LedgerEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExpenseAdded(_) => "expense_added",
            Self::ExpenseUpdated { .. } => "expense_updated",
            Self::ExpenseDeleted(_) => "expense_deleted",
            Self::BudgetSet { .. } => "budget_set",
            Self::Replaced => "replaced",
        }
    }
}

/// Receiver of ledger change notifications
pub trait LedgerObserver {
    fn ledger_changed(&mut self, event: &LedgerEvent, ledger: &Ledger);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent, &Ledger),
{
    fn ledger_changed(&mut self, event: &LedgerEvent, ledger: &Ledger) {
        self(event, ledger)
    }
}

/// Handle returned by [`Ledger::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
