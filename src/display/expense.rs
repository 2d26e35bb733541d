//! Expense display formatting
//!
//! Table and detail views for expenses, honouring the configured currency
//! symbol and date format.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// How amounts and dates are rendered
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions<'a> {
    pub currency_symbol: &'a str,
    pub date_format: &'a str,
}

impl Default for DisplayOptions<'_> {
    fn default() -> Self {
        Self {
            currency_symbol: "$",
            date_format: FALLBACK_DATE_FORMAT,
        }
    }
}

impl DisplayOptions<'_> {
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(self.currency_symbol)
    }

    /// Format a date, falling back to ISO when the configured format is invalid
    pub fn date(&self, date: NaiveDate) -> String {
        let valid = !StrftimeItems::new(self.date_format).any(|item| matches!(item, Item::Error));
        let format = if valid {
            self.date_format
        } else {
            FALLBACK_DATE_FORMAT
        };
        date.format(format).to_string()
    }
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, options: &DisplayOptions<'_>) -> Self {
        Self {
            id: expense.id.short(),
            date: options.date(expense.date),
            description: truncate(&expense.description, 32),
            category: expense.category.label().to_string(),
            amount: options.money(expense.amount),
        }
    }
}

/// Format expenses as a table with a total line
pub fn format_expense_table(expenses: &[&Expense], options: &DisplayOptions<'_>) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow::new(e, options))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        options.money(total)
    )
}

/// Everything spent on one day
pub fn format_day(date: NaiveDate, expenses: &[&Expense], options: &DisplayOptions<'_>) -> String {
    let mut output = format!("{}\n", date.format("%A, %B %-d, %Y"));
    if expenses.is_empty() {
        output.push_str("No expenses on this day.\n");
        return output;
    }
    output.push_str(&format_expense_table(expenses, options));
    output
}

/// Format a single expense in detail
pub fn format_expense_details(expense: &Expense, options: &DisplayOptions<'_>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", options.date(expense.date)));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Amount:      {}\n", options.money(expense.amount)));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        expense.category.label(),
        expense.category.accent()
    ));
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
