//! Budget CLI commands
//!
//! One spending limit per calendar month. Setting a budget for a month that
//! already has one replaces it.

use clap::Subcommand;

use super::{display_options, parse_month, parse_non_negative_amount};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::MonthlyBudget;
use crate::reports::BudgetStatus;
use crate::storage::{LedgerStorage, PersistentLedger};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// Amount (e.g., "500" or "500.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budget versus spending for a month
    Show {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List every month that has a budget
    List,
}

/// Handle a budget command
pub fn handle_budget_command<S: LedgerStorage>(
    ledger: &mut PersistentLedger<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let options = display_options(settings);

    match cmd {
        BudgetCommands::Set { amount, month } => {
            let amount = parse_non_negative_amount(&amount)?;
            let month = parse_month(month.as_deref())?;

            let previous = ledger.set_budget(MonthlyBudget::for_month(amount, month))?;

            match previous {
                Some(previous) => println!(
                    "Budget for {} changed from {} to {}",
                    month,
                    options.money(previous.amount),
                    options.money(amount)
                ),
                None => println!("Budget for {} set to {}", month, options.money(amount)),
            }
        }

        BudgetCommands::Show { month } => {
            let month = parse_month(month.as_deref())?;
            let status = BudgetStatus::for_month(ledger.ledger(), month);
            print!("{}", status.format_terminal(options.currency_symbol));
        }

        BudgetCommands::List => {
            let mut budgets: Vec<&MonthlyBudget> = ledger.ledger().budgets().iter().collect();
            if budgets.is_empty() {
                println!("No budgets set.");
                return Ok(());
            }
            budgets.sort_by_key(|b| (b.year, b.month));

            println!("{:<20} {:>12} {:>12}", "Month", "Budget", "Spent");
            println!("{}", "-".repeat(46));
            for budget in budgets {
                let label = match budget.month_ref() {
                    Some(month) => month.to_string(),
                    None => format!("{} (month {})", budget.year, budget.month),
                };
                let spent = ledger.ledger().total_expenses(budget.month, budget.year);
                println!(
                    "{:<20} {:>12} {:>12}",
                    label,
                    options.money(budget.amount),
                    options.money(spent)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStorage;

    fn set(ledger: &mut PersistentLedger<MemoryStorage>, amount: &str) -> LedgerResult<()> {
        handle_budget_command(
            ledger,
            &Settings::default(),
            BudgetCommands::Set {
                amount: amount.into(),
                month: Some("2024-03".into()),
            },
        )
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut ledger = PersistentLedger::open(MemoryStorage::new(), true).unwrap();
        set(&mut ledger, "500").unwrap();
        set(&mut ledger, "600").unwrap();

        let budgets = ledger.storage().stored().budgets;
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, Money::from_units(600));
        assert_eq!((budgets[0].month, budgets[0].year), (2, 2024));
    }

    #[test]
    fn test_set_rejects_negative() {
        let mut ledger = PersistentLedger::open(MemoryStorage::new(), true).unwrap();
        assert!(set(&mut ledger, "-10").unwrap_err().is_validation());
        assert!(ledger.ledger().budgets().is_empty());
    }
}
