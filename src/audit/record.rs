//! Typed audit records
//!
//! A record is a timestamped [`LedgerChange`], which holds the affected
//! expense or budget itself rather than an untyped JSON blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEvent;
use crate::models::{Expense, ExpenseId, MonthlyBudget};

/// One auditable change to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerChange {
    ExpenseAdded {
        expense: Expense,
    },
    ExpenseEdited {
        before: Expense,
        after: Expense,
    },
    ExpenseRemoved {
        expense: Expense,
    },
    BudgetSet {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<MonthlyBudget>,
        budget: MonthlyBudget,
    },
}

impl LedgerChange {
    /// The change an event records, `None` for wholesale replacement
    pub fn from_event(event: &LedgerEvent) -> Option<Self> {
        let change = match event {
            LedgerEvent::ExpenseAdded(expense) => Self::ExpenseAdded {
                expense: expense.clone(),
            },
            LedgerEvent::ExpenseUpdated { before, after } => Self::ExpenseEdited {
                before: before.clone(),
                after: after.clone(),
            },
            LedgerEvent::ExpenseDeleted(expense) => Self::ExpenseRemoved {
                expense: expense.clone(),
            },
            LedgerEvent::BudgetSet { previous, budget } => Self::BudgetSet {
                previous: *previous,
                budget: *budget,
            },
            LedgerEvent::Replaced => return None,
        };
        Some(change)
    }

    /// The expense this change touched, if any
    pub fn expense_id(&self) -> Option<ExpenseId> {
        match self {
            Self::ExpenseAdded { expense } | Self::ExpenseRemoved { expense } => Some(expense.id),
            Self::ExpenseEdited { after, .. } => Some(after.id),
            Self::BudgetSet { .. } => None,
        }
    }

    /// One-line description, e.g. `edited exp-550e8400 Lunch: amount $20.00 -> $25.00`
    pub fn summary(&self) -> String {
        match self {
            Self::ExpenseAdded { expense } => format!(
                "added {} {}: {} {} on {}",
                expense.id.short(),
                expense.description,
                expense.amount,
                expense.category,
                expense.date
            ),
            Self::ExpenseEdited { before, after } => {
                let changes = describe_expense_changes(before, after)
                    .unwrap_or_else(|| "no field changed".to_string());
                format!("edited {} {}: {}", after.id.short(), after.description, changes)
            }
            Self::ExpenseRemoved { expense } => format!(
                "removed {} {}: {} {} on {}",
                expense.id.short(),
                expense.description,
                expense.amount,
                expense.category,
                expense.date
            ),
            Self::BudgetSet {
                previous: Some(previous),
                budget,
            } => format!(
                "budget {} changed from {} to {}",
                budget_label(budget),
                previous.amount,
                budget.amount
            ),
            Self::BudgetSet {
                previous: None,
                budget,
            } => format!("budget {} set to {}", budget_label(budget), budget.amount),
        }
    }
}

/// A change and when it was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub at: DateTime<Utc>,
    pub change: LedgerChange,
}

impl AuditRecord {
    pub fn now(change: LedgerChange) -> Self {
        Self {
            at: Utc::now(),
            change,
        }
    }

    pub fn format_line(&self) -> String {
        format!(
            "{}  {}",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.change.summary()
        )
    }
}

fn budget_label(budget: &MonthlyBudget) -> String {
    match budget.month_ref() {
        Some(month) => month.to_key(),
        None => format!("{}-m{}", budget.year, budget.month),
    }
}

/// Field-by-field summary of an expense edit, `None` if nothing changed
pub fn describe_expense_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(format!("date {} -> {}", before.date, after.date));
    }
    if before.description != after.description {
        changes.push(format!(
            "description {:?} -> {:?}",
            before.description, after.description
        ));
    }
    if before.amount != after.amount {
        changes.push(format!("amount {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category {} -> {}", before.category, after.category));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
