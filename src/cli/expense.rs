//! Expense CLI commands

use clap::Subcommand;

use super::{
    display_options, parse_category, parse_date, parse_month, parse_non_negative_amount,
    resolve_expense_id,
};
use crate::config::Settings;
use crate::display::{format_day, format_expense_details, format_expense_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseCategory, ExpensePatch};
use crate::storage::{LedgerStorage, PersistentLedger};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "12.50" or "100")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (food, transportation, entertainment, shopping,
        /// utilities, housing, health, education, travel, other)
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense ID (full or the short exp-xxxxxxxx form)
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or the short exp-xxxxxxxx form)
        id: String,
    },

    /// List expenses for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// List every expense in the ledger
        #[arg(long)]
        all: bool,
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the expenses of one day
    Day {
        /// Date (YYYY-MM-DD, "today" or "yesterday")
        date: String,
    },

    /// Show one expense in detail
    Show {
        /// Expense ID (full or the short exp-xxxxxxxx form)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: LedgerStorage>(
    ledger: &mut PersistentLedger<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let options = display_options(settings);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_non_negative_amount(&amount)?;
            let category = parse_category(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Local::now().date_naive(),
            };

            let expense = Expense::new(date, description.trim(), amount, category);
            expense
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            let short_id = expense.id.short();
            let summary = format!(
                "{} {} on {}",
                options.money(expense.amount),
                expense.description,
                options.date(expense.date)
            );
            ledger.add_expense(expense)?;

            println!("Added {} ({})", summary, short_id);
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let id = resolve_expense_id(ledger.ledger(), &id)?;

            let mut patch = ExpensePatch::new();
            if let Some(description) = description {
                patch = patch.description(description.trim());
            }
            if let Some(amount) = amount {
                patch = patch.amount(parse_non_negative_amount(&amount)?);
            }
            if let Some(category) = category {
                patch = patch.category(parse_category(&category)?);
            }
            if let Some(date) = date {
                patch = patch.date(parse_date(&date)?);
            }
            if patch.is_empty() {
                return Err(LedgerError::Validation(
                    "Nothing to change. Pass --description, --amount, --category or --date"
                        .into(),
                ));
            }

            let mut preview = ledger
                .ledger()
                .expense(id)
                .cloned()
                .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
            preview.apply(&patch);
            preview
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            if !ledger.update_expense(id, patch)? {
                return Err(LedgerError::expense_not_found(id.to_string()));
            }

            println!("Updated {}", id.short());
            print!("{}", format_expense_details(&preview, &options));
        }

        ExpenseCommands::Delete { id } => {
            let id = resolve_expense_id(ledger.ledger(), &id)?;
            let description = ledger
                .ledger()
                .expense(id)
                .map(|e| e.description.clone())
                .unwrap_or_default();

            if !ledger.delete_expense(id)? {
                return Err(LedgerError::expense_not_found(id.to_string()));
            }

            println!("Deleted {} ({})", description, id.short());
        }

        ExpenseCommands::List {
            month,
            all,
            category,
        } => {
            let category: Option<ExpenseCategory> =
                category.as_deref().map(parse_category).transpose()?;

            let (heading, mut expenses) = if all {
                (
                    "All expenses".to_string(),
                    ledger.ledger().expenses().iter().collect::<Vec<_>>(),
                )
            } else {
                let month = parse_month(month.as_deref())?;
                (
                    format!("Expenses for {}", month),
                    ledger
                        .ledger()
                        .monthly_expenses(month.month(), month.year()),
                )
            };

            if let Some(category) = category {
                expenses.retain(|e| e.category == category);
            }
            expenses.sort_by_key(|e| e.date);

            println!("{}", heading);
            print!("{}", format_expense_table(&expenses, &options));
        }

        ExpenseCommands::Day { date } => {
            let date = parse_date(&date)?;
            let expenses = ledger.ledger().daily_expenses(date);
            print!("{}", format_day(date, &expenses, &options));
        }

        ExpenseCommands::Show { id } => {
            let id = resolve_expense_id(ledger.ledger(), &id)?;
            let expense = ledger
                .ledger()
                .expense(id)
                .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(expense, &options));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStorage;

    fn open() -> PersistentLedger<MemoryStorage> {
        PersistentLedger::open(MemoryStorage::new(), true).unwrap()
    }

    fn add(ledger: &mut PersistentLedger<MemoryStorage>, description: &str, amount: &str) -> LedgerResult<()> {
        handle_expense_command(
            ledger,
            &Settings::default(),
            ExpenseCommands::Add {
                description: description.into(),
                amount: amount.into(),
                category: "food".into(),
                date: Some("2024-03-05".into()),
            },
        )
    }

    #[test]
    fn test_add_persists() {
        let mut ledger = open();
        add(&mut ledger, "Lunch", "12.50").unwrap();

        let stored = ledger.storage().stored();
        assert_eq!(stored.expenses.len(), 1);
        assert_eq!(stored.expenses[0].amount, Money::from_cents(1250));
        assert_eq!(stored.expenses[0].category, ExpenseCategory::Food);
    }

    #[test]
    fn test_add_rejects_bad_input_before_store() {
        let mut ledger = open();

        assert!(add(&mut ledger, "   ", "5").unwrap_err().is_validation());
        assert!(add(&mut ledger, "Lunch", "-5").unwrap_err().is_validation());
        assert!(add(&mut ledger, "Lunch", "five").unwrap_err().is_validation());
        assert!(ledger.ledger().expenses().is_empty());
        assert_eq!(ledger.storage().save_count(), 0);
    }

    #[test]
    fn test_edit_and_delete_by_short_id() {
        let mut ledger = open();
        add(&mut ledger, "Lunch", "12.50").unwrap();
        let short = ledger.ledger().expenses()[0].id.short();

        handle_expense_command(
            &mut ledger,
            &Settings::default(),
            ExpenseCommands::Edit {
                id: short.clone(),
                description: None,
                amount: Some("15".into()),
                category: None,
                date: None,
            },
        )
        .unwrap();
        assert_eq!(ledger.ledger().expenses()[0].amount, Money::from_units(15));

        handle_expense_command(
            &mut ledger,
            &Settings::default(),
            ExpenseCommands::Delete { id: short },
        )
        .unwrap();
        assert!(ledger.ledger().expenses().is_empty());
    }

    #[test]
    fn test_edit_without_changes_is_rejected() {
        let mut ledger = open();
        add(&mut ledger, "Lunch", "12.50").unwrap();
        let id = ledger.ledger().expenses()[0].id.to_string();

        let err = handle_expense_command(
            &mut ledger,
            &Settings::default(),
            ExpenseCommands::Edit {
                id,
                description: None,
                amount: None,
                category: None,
                date: None,
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let mut ledger = open();
        let err = handle_expense_command(
            &mut ledger,
            &Settings::default(),
            ExpenseCommands::Delete {
                id: "550e8400-e29b-41d4-a716-446655440000".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.storage().save_count(), 0);
    }
}
