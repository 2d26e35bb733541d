//! CLI commands for the month views
//!
//! `summary` prints the budget header and the category breakdown;
//! `calendar` prints the header and the day grid.

use clap::Subcommand;

use super::{display_options, parse_month};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::reports::{BudgetStatus, CalendarMonth, CategoryBreakdown};
use crate::storage::{LedgerStorage, PersistentLedger};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Budget status and spending by category for a month
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Calendar of daily spending for a month
    Calendar {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command<S: LedgerStorage>(
    ledger: &PersistentLedger<S>,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let symbol = display_options(settings).currency_symbol;

    match cmd {
        ReportCommands::Summary { month } => {
            let month = parse_month(month.as_deref())?;
            let status = BudgetStatus::for_month(ledger.ledger(), month);
            let breakdown = CategoryBreakdown::for_month(ledger.ledger(), month);

            print!("{}", status.format_terminal(symbol));
            println!();
            print!("{}", breakdown.format_terminal(symbol));
        }

        ReportCommands::Calendar { month } => {
            let month = parse_month(month.as_deref())?;
            let status = BudgetStatus::for_month(ledger.ledger(), month);
            let calendar = CalendarMonth::build(ledger.ledger(), month, settings.week_start());

            print!("{}", status.format_terminal(symbol));
            println!();
            print!("{}", calendar.format_terminal(symbol));
        }
    }

    Ok(())
}
