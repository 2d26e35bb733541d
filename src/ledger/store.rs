//! The in-memory ledger
//!
//! `Ledger` is the single owner of all expenses and budgets. Every operation
//! is synchronous and total: unknown ids are no-ops, and the ledger accepts
//! any well-typed record it is given. Validation happens before the call.
//!
//! All queries are linear scans in insertion order.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use tracing::debug;

use super::observer::{LedgerEvent, LedgerObserver, SubscriptionId};
use super::snapshot::LedgerSnapshot;
use crate::models::{Expense, ExpenseId, ExpensePatch, Money, MonthlyBudget};

/// Authoritative holder of the expense and budget collections
pub struct Ledger {
    expenses: Vec<Expense>,
    budgets: Vec<MonthlyBudget>,
    observers: Vec<(SubscriptionId, Box<dyn LedgerObserver>)>,
    next_subscription: u64,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            budgets: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a ledger holding the contents of `snapshot`.
    ///
    /// Budgets are folded in with [`Ledger::set_budget`] semantics, so a
    /// snapshot that repeats a `(month, year)` key keeps the last one.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut ledger = Self::new();
        ledger.load(snapshot);
        ledger
    }

    fn load(&mut self, snapshot: LedgerSnapshot) {
        self.expenses = snapshot.expenses;
        self.budgets.clear();
        for budget in snapshot.budgets {
            match self.budget_slot(budget.month, budget.year) {
                Some(index) => self.budgets[index] = budget,
                None => self.budgets.push(budget),
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append an expense.
    ///
    /// The caller is responsible for id uniqueness; a duplicate id is
    /// accepted as-is.
    pub fn add_expense(&mut self, expense: Expense) {
        debug!(id = %expense.id, date = %expense.date, amount = %expense.amount, "add expense");
        self.expenses.push(expense.clone());
        self.notify(&LedgerEvent::ExpenseAdded(expense));
    }

    /// Merge `patch` into the expense with `id`.
    ///
    /// Returns `false` and changes nothing if no expense has that id.
    pub fn update_expense(&mut self, id: ExpenseId, patch: ExpensePatch) -> bool {
        let mut events = Vec::new();
        for expense in self.expenses.iter_mut().filter(|e| e.id == id) {
            let before = expense.clone();
            expense.apply(&patch);
            events.push(LedgerEvent::ExpenseUpdated {
                before,
                after: expense.clone(),
            });
        }

        if events.is_empty() {
            debug!(%id, "update ignored, no such expense");
            return false;
        }

        debug!(%id, "update expense");
        for event in &events {
            self.notify(event);
        }
        true
    }

    /// Remove the expense with `id`.
    ///
    /// Returns `false` and changes nothing if no expense has that id, so
    /// repeating a delete is harmless.
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| e.id == id);
        self.expenses = kept;

        if removed.is_empty() {
            debug!(%id, "delete ignored, no such expense");
            return false;
        }

        debug!(%id, "delete expense");
        for expense in removed {
            self.notify(&LedgerEvent::ExpenseDeleted(expense));
        }
        true
    }

    /// Store `budget`, replacing any budget for the same `(month, year)`.
    ///
    /// A replaced budget keeps its position; a new key is appended. Returns
    /// the budget that was replaced, if any.
    pub fn set_budget(&mut self, budget: MonthlyBudget) -> Option<MonthlyBudget> {
        let previous = match self.budget_slot(budget.month, budget.year) {
            Some(index) => Some(std::mem::replace(&mut self.budgets[index], budget)),
            None => {
                self.budgets.push(budget);
                None
            }
        };

        debug!(
            month = budget.month,
            year = budget.year,
            amount = %budget.amount,
            replaced = previous.is_some(),
            "set budget"
        );
        self.notify(&LedgerEvent::BudgetSet { previous, budget });
        previous
    }

    /// Swap both collections for the contents of `snapshot`
    pub fn replace_all(&mut self, snapshot: LedgerSnapshot) {
        self.load(snapshot);
        debug!(
            expenses = self.expenses.len(),
            budgets = self.budgets.len(),
            "ledger replaced"
        );
        self.notify(&LedgerEvent::Replaced);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The budget for a zero-based month and year, if one has been set
    pub fn monthly_budget(&self, month: u32, year: i32) -> Option<&MonthlyBudget> {
        self.budgets.iter().find(|b| b.matches(month, year))
    }

    /// Expenses dated in the given zero-based month and year, in insertion order
    pub fn monthly_expenses(&self, month: u32, year: i32) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.date.month0() == month && e.date.year() == year)
            .collect()
    }

    /// Expenses dated exactly on `date`, in insertion order
    pub fn daily_expenses(&self, date: NaiveDate) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| e.date == date).collect()
    }

    /// Sum of the amounts returned by [`Ledger::monthly_expenses`]
    pub fn total_expenses(&self, month: u32, year: i32) -> Money {
        self.monthly_expenses(month, year)
            .into_iter()
            .map(|e| e.amount)
            .sum()
    }

    /// Look up a single expense
    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// All budgets in insertion order
    pub fn budgets(&self) -> &[MonthlyBudget] {
        &self.budgets
    }

    /// Clone both collections into a serializable snapshot
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.expenses.clone(), self.budgets.clone())
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register an observer to be called after every committed change
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: LedgerObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn budget_slot(&self, month: u32, year: i32) -> Option<usize> {
        self.budgets.iter().position(|b| b.matches(month, year))
    }

    fn notify(&mut self, event: &LedgerEvent) {
        // Observers only get `&Ledger`, so none can be added mid-dispatch.
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            observer.ledger_changed(event, self);
        }
        self.observers = observers;
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("expenses", &self.expenses)
            .field("budgets", &self.budgets)
            .field("observers", &self.observers.len())
            .finish()
    }
}
