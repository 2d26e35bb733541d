//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. User input is validated
//! here, before any store call, and rejected as `LedgerError::Validation`.

pub mod budget;
pub mod expense;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::DisplayOptions;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{ExpenseCategory, ExpenseId, Money, MonthRef};

/// Parse a user-supplied amount
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "{}. Use a format like '12.50' or '100'",
            e
        ))
    })
}

/// Parse a non-negative amount
pub fn parse_non_negative_amount(input: &str) -> LedgerResult<Money> {
    let amount = parse_amount(input)?;
    if amount.is_negative() {
        return Err(LedgerError::Validation(format!(
            "Amount cannot be negative: {}",
            input.trim()
        )));
    }
    Ok(amount)
}

/// Parse `YYYY-MM-DD`, `today` or `yesterday`
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    let today = chrono::Local::now().date_naive();
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .pred_opt()
            .ok_or_else(|| LedgerError::Validation("Date out of range".into())),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            LedgerError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", input))
        }),
    }
}

/// Parse a category name, case-insensitively
pub fn parse_category(input: &str) -> LedgerResult<ExpenseCategory> {
    input.parse().map_err(|_| {
        let known: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect();
        LedgerError::Validation(format!(
            "Unknown category: '{}'. Expected one of: {}",
            input,
            known.join(", ")
        ))
    })
}

/// Parse `YYYY-MM`, defaulting to the current month
pub fn parse_month(input: Option<&str>) -> LedgerResult<MonthRef> {
    match input {
        None => Ok(MonthRef::current()),
        Some(s) => s
            .parse()
            .map_err(|e: crate::models::MonthParseError| LedgerError::Validation(e.to_string())),
    }
}

/// Resolve a full id, or the short `exp-xxxxxxxx` form shown in tables
///
/// A full UUID is returned as-is, whether or not it exists. A short form
/// must match exactly one expense in the ledger.
pub fn resolve_expense_id(ledger: &Ledger, input: &str) -> LedgerResult<ExpenseId> {
    if let Ok(id) = input.parse::<ExpenseId>() {
        return Ok(id);
    }

    let trimmed = input.trim();
    let prefix = trimmed
        .strip_prefix("exp-")
        .unwrap_or(trimmed)
        .replace('-', "")
        .to_lowercase();
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LedgerError::Validation(format!(
            "Invalid expense id: '{}'",
            input
        )));
    }

    let mut matches: Vec<ExpenseId> = Vec::new();
    for id in ledger.expenses().iter().map(|e| e.id) {
        if id.as_uuid().simple().to_string().starts_with(&prefix) && !matches.contains(&id) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [] => Err(LedgerError::expense_not_found(input)),
        [id] => Ok(*id),
        _ => Err(LedgerError::Validation(format!(
            "Ambiguous expense id '{}' matches {} expenses; use more characters",
            input,
            matches.len()
        ))),
    }
}

/// Display options taken from the user's settings
pub fn display_options(settings: &Settings) -> DisplayOptions<'_> {
    DisplayOptions {
        currency_symbol: &settings.currency_symbol,
        date_format: &settings.date_format,
    }
}
