//! Monthly budget model
//!
//! A budget is a spending ceiling for one calendar month. The ledger keeps at
//! most one budget per `(month, year)` key.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::MonthRef;

/// Spending ceiling for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub amount: Money,

    /// Zero-based month index (0 = January)
    pub month: u32,

    pub year: i32,
}

impl MonthlyBudget {
    pub fn new(amount: Money, month: u32, year: i32) -> Self {
        Self {
            amount,
            month,
            year,
        }
    }

    /// Create a budget for an already validated month
    pub fn for_month(amount: Money, month: MonthRef) -> Self {
        Self::new(amount, month.month(), month.year())
    }

    /// The `(month, year)` key this budget occupies
    pub fn key(&self) -> (u32, i32) {
        (self.month, self.year)
    }

    /// Check whether this budget belongs to `(month, year)`
    pub fn matches(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// The month as a `MonthRef`, or `None` if the stored index is out of range
    pub fn month_ref(&self) -> Option<MonthRef> {
        MonthRef::new(self.month, self.year)
    }
}

impl fmt::Display for MonthlyBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month_ref() {
            Some(month) => write!(f, "{} budget: {}", month, self.amount),
            None => write!(
                f,
                "budget for month {} of {}: {}",
                self.month, self.year, self.amount
            ),
        }
    }
}
