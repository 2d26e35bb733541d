//! Category breakdown
//!
//! Per-category spending for one month, the data behind the summary chart.

use std::collections::HashMap;

use crate::ledger::Ledger;
use crate::models::{ExpenseCategory, Money, MonthRef};

/// One chart slice
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: ExpenseCategory,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the charted total, 0-100
    pub percentage: f64,
}

impl CategorySlice {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn color(&self) -> &'static str {
        self.category.chart_color()
    }
}

/// Spending by category for a month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub month: MonthRef,
    /// Categories with a positive total, in `ExpenseCategory::ALL` order
    pub slices: Vec<CategorySlice>,
    /// Sum of the slice totals; the base of every percentage
    pub charted_total: Money,
    /// Net spending for the month, refunds included
    pub total: Money,
    pub expense_count: usize,
}

impl CategoryBreakdown {
    pub fn for_month(ledger: &Ledger, month: MonthRef) -> Self {
        let expenses = ledger.monthly_expenses(month.month(), month.year());

        let mut per_category: HashMap<ExpenseCategory, (Money, usize)> = HashMap::new();
        for expense in &expenses {
            let entry = per_category
                .entry(expense.category)
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let total: Money = expenses.iter().map(|e| e.amount).sum();

        let kept: Vec<(ExpenseCategory, Money, usize)> = ExpenseCategory::ALL
            .iter()
            .filter_map(|category| {
                let (sum, count) = per_category.get(category)?;
                sum.is_positive().then_some((*category, *sum, *count))
            })
            .collect();
        let charted_total: Money = kept.iter().map(|(_, sum, _)| *sum).sum();

        let slices = kept
            .into_iter()
            .map(|(category, sum, count)| CategorySlice {
                category,
                total: sum,
                expense_count: count,
                percentage: sum.percent_of(charted_total),
            })
            .collect();

        Self {
            month,
            slices,
            charted_total,
            total,
            expense_count: expenses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// The slice with the largest total
    pub fn largest(&self) -> Option<&CategorySlice> {
        self.slices.iter().max_by_key(|s| s.total)
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format!("Expense Summary: {}\n", self.month);
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses recorded this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>12} {:>7} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", "Colour"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for slice in &self.slices {
            output.push_str(&format!(
                "{:<18} {:>12} {:>7} {:>6.1}%  {}\n",
                slice.label(),
                slice.total.format_with_symbol(symbol),
                slice.expense_count,
                slice.percentage,
                slice.color()
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12} {:>7}\n",
            "Total",
            self.charted_total.format_with_symbol(symbol),
            self.expense_count
        ));
        if self.total != self.charted_total {
            output.push_str(&format!(
                "{:<18} {:>12}\n",
                "Net of refunds",
                self.total.format_with_symbol(symbol)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use chrono::NaiveDate;

    fn add(ledger: &mut Ledger, day: u32, units: i64, category: ExpenseCategory) {
        ledger.add_expense(Expense::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            "item",
            Money::from_units(units),
            category,
        ));
    }

    fn march() -> MonthRef {
        MonthRef::new(2, 2024).unwrap()
    }

    #[test]
    fn test_empty_month() {
        let breakdown = CategoryBreakdown::for_month(&Ledger::new(), march());
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total, Money::zero());
        assert!(breakdown.largest().is_none());
    }

    #[test]
    fn test_slices_in_canonical_order_with_percentages() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 30, ExpenseCategory::Travel);
        add(&mut ledger, 2, 50, ExpenseCategory::Food);
        add(&mut ledger, 3, 20, ExpenseCategory::Food);

        let breakdown = CategoryBreakdown::for_month(&ledger, march());

        let categories: Vec<_> = breakdown.slices.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![ExpenseCategory::Food, ExpenseCategory::Travel]
        );
        assert_eq!(breakdown.slices[0].total, Money::from_units(70));
        assert_eq!(breakdown.slices[0].expense_count, 2);
        assert!((breakdown.slices[0].percentage - 70.0).abs() < 1e-9);
        assert!((breakdown.slices[1].percentage - 30.0).abs() < 1e-9);
        assert_eq!(breakdown.total, Money::from_units(100));
        assert_eq!(breakdown.largest().unwrap().category, ExpenseCategory::Food);
    }

    #[test]
    fn test_zero_total_categories_are_hidden() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 0, ExpenseCategory::Health);
        add(&mut ledger, 1, 10, ExpenseCategory::Other);

        let breakdown = CategoryBreakdown::for_month(&ledger, march());
        assert_eq!(breakdown.slices.len(), 1);
        assert_eq!(breakdown.slices[0].category, ExpenseCategory::Other);
        assert_eq!(breakdown.expense_count, 2);
    }

    #[test]
    fn test_refunds_do_not_produce_negative_slices() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 100, ExpenseCategory::Food);
        add(&mut ledger, 2, -50, ExpenseCategory::Shopping);

        let breakdown = CategoryBreakdown::for_month(&ledger, march());

        assert_eq!(breakdown.slices.len(), 1);
        assert_eq!(breakdown.slices[0].category, ExpenseCategory::Food);
        assert!((breakdown.slices[0].percentage - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.charted_total, Money::from_units(100));
        assert_eq!(breakdown.total, Money::from_units(50));

        let text = breakdown.format_terminal("$");
        assert!(!text.contains("Shopping"));
        assert!(text.contains("Net of refunds"));
    }

    #[test]
    fn test_percentages_use_charted_total() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 60, ExpenseCategory::Food);
        add(&mut ledger, 2, 20, ExpenseCategory::Travel);
        add(&mut ledger, 3, 30, ExpenseCategory::Health);
        add(&mut ledger, 4, -40, ExpenseCategory::Health);

        let breakdown = CategoryBreakdown::for_month(&ledger, march());

        let shares: Vec<f64> = breakdown.slices.iter().map(|s| s.percentage).collect();
        assert_eq!(shares.len(), 2);
        assert!((shares[0] - 75.0).abs() < 1e-9);
        assert!((shares[1] - 25.0).abs() < 1e-9);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_months_are_ignored() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 10, ExpenseCategory::Food);
        ledger.add_expense(Expense::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            "April",
            Money::from_units(99),
            ExpenseCategory::Food,
        ));

        let breakdown = CategoryBreakdown::for_month(&ledger, march());
        assert_eq!(breakdown.total, Money::from_units(10));
    }

    #[test]
    fn test_format_terminal() {
        let mut ledger = Ledger::new();
        add(&mut ledger, 1, 10, ExpenseCategory::Shopping);

        let text = CategoryBreakdown::for_month(&ledger, march()).format_terminal("$");
        assert!(text.contains("Expense Summary: March 2024"));
        assert!(text.contains("Shopping"));
        assert!(text.contains("#f472b6"));
        assert!(text.contains("100.0%"));
    }
}
