use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_calendar::audit::{AuditLog, AuditObserver};
use expense_calendar::cli::{
    handle_budget_command, handle_expense_command, handle_report_command, BudgetCommands,
    ExpenseCommands, ReportCommands,
};
use expense_calendar::config::{paths::DATA_DIR_ENV, LedgerPaths, Settings};
use expense_calendar::storage::{JsonFileStorage, PersistentLedger};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense ledger with monthly budgets",
    long_about = "Record daily expenses, set a spending budget per month, and see \
                  where the money went as a calendar or a category breakdown."
)]
struct Cli {
    /// Directory holding settings, the ledger and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of records to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Only changes to this expense (full id or unique prefix, removed expenses included)
        #[arg(long, value_name = "ID")]
        expense: Option<String>,
    },

    /// Show current configuration and paths
    Config {
        /// Write config.json with the current settings if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    expense_calendar::init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load(&paths)?;

    let Some(command) = cli.command else {
        println!("expense - personal expense ledger");
        println!();
        println!("Run 'expense --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Audit { count, expense } => {
            let log = AuditLog::new(paths.audit_log());
            let mut records = match expense {
                Some(id) => log.history(&id)?,
                None => log.records()?,
            };
            let records = records.split_off(records.len().saturating_sub(count));
            if records.is_empty() {
                println!("No audit records.");
            }
            for record in records {
                println!("{}", record.format_line());
            }
            return Ok(());
        }
        Commands::Config { init } => {
            if init {
                if paths.settings_file().exists() {
                    println!("Settings file already exists, leaving it unchanged.");
                } else {
                    settings.save(&paths)?;
                    println!("Wrote {}", paths.settings_file().display());
                }
                println!();
            }
            println!("expense-calendar configuration");
            println!("==============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  First day of week: {:?}", settings.week_start());
            println!("  Autosave:          {}", settings.autosave);
            return Ok(());
        }
        _ => {}
    }

    let storage = JsonFileStorage::new(paths.ledger_file());
    let mut ledger = PersistentLedger::open(storage, settings.autosave)?;
    ledger.subscribe(AuditObserver::new(AuditLog::new(paths.audit_log())));

    match command {
        Commands::Expense(cmd) => handle_expense_command(&mut ledger, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&ledger, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut ledger, &settings, cmd)?,
        Commands::Audit { .. } | Commands::Config { .. } => {}
    }

    ledger.flush()?;
    Ok(())
}
