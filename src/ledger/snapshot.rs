//! Serializable copy of the ledger's collections

use serde::{Deserialize, Serialize};

use crate::models::{Expense, MonthlyBudget};

/// Current on-disk layout version
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// The two ledger collections as plain lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub budgets: Vec<MonthlyBudget>,
}

impl LedgerSnapshot {
    pub fn new(expenses: Vec<Expense>, budgets: Vec<MonthlyBudget>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            expenses,
            budgets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.budgets.is_empty()
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
