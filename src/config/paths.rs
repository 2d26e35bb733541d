//! Path management
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_CALENDAR_DATA_DIR` environment variable (if set)
//! 2. The platform config directory: `$XDG_CONFIG_HOME/expense-calendar` or
//!    `~/.config/expense-calendar` on Unix, `%APPDATA%\expense-calendar` on
//!    Windows

use std::path::PathBuf;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_CALENDAR_DATA_DIR";

const APP_DIR: &str = "expense-calendar";

/// All paths used by the application
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// `<base>/data/`
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// `<base>/config.json`
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// `<base>/audit.log`
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// `<base>/data/ledger.json`
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR))
        .ok_or_else(|| LedgerError::Config("Could not determine a home directory".into()))
}
