//! Budget status for one month
//!
//! What the budget header shows: the month's budget, total spending, and
//! how much is left (or how far over).

use crate::ledger::Ledger;
use crate::models::{Money, MonthRef};

/// Budget versus spending for a month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub month: MonthRef,
    /// `None` when no budget has been set for the month
    pub budget: Option<Money>,
    pub spent: Money,
    /// `budget - spent`; zero when there is no budget
    pub remaining: Money,
}

impl BudgetStatus {
    pub fn for_month(ledger: &Ledger, month: MonthRef) -> Self {
        let budget = ledger
            .monthly_budget(month.month(), month.year())
            .map(|b| b.amount);
        let spent = ledger.total_expenses(month.month(), month.year());
        let remaining = budget.map(|b| b - spent).unwrap_or_default();

        Self {
            month,
            budget,
            spent,
            remaining,
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget.is_some()
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Share of the budget already spent, `None` without a positive budget
    pub fn percent_used(&self) -> Option<f64> {
        match self.budget {
            Some(budget) if budget.is_positive() => Some(self.spent.percent_of(budget)),
            _ => None,
        }
    }

    /// Format the status for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format!("{}\n", self.month);
        output.push_str(&"=".repeat(40));
        output.push('\n');

        let Some(budget) = self.budget else {
            output.push_str(&format!(
                "Spent:      {:>14}\n",
                self.spent.format_with_symbol(symbol)
            ));
            output.push_str("No budget set for this month.\n");
            return output;
        };

        output.push_str(&format!(
            "Budget:     {:>14}\n",
            budget.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Spent:      {:>14}\n",
            self.spent.format_with_symbol(symbol)
        ));
        if self.is_over_budget() {
            output.push_str(&format!(
                "Over by:    {:>14}\n",
                self.remaining.abs().format_with_symbol(symbol)
            ));
        } else {
            output.push_str(&format!(
                "Remaining:  {:>14}\n",
                self.remaining.format_with_symbol(symbol)
            ));
        }
        if let Some(pct) = self.percent_used() {
            output.push_str(&format!("Used:       {:>13.1}%\n", pct));
        }

        output
    }
}
