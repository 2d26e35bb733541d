//! Storage backends for ledger snapshots

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use tracing::info;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{LedgerSnapshot, SNAPSHOT_VERSION};

/// Somewhere a ledger snapshot can be loaded from and saved to
pub trait LedgerStorage {
    /// Load the stored snapshot; an absent store yields an empty snapshot
    fn load(&self) -> LedgerResult<LedgerSnapshot>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()>;
}

/// A single pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonFileStorage {
    fn load(&self) -> LedgerResult<LedgerSnapshot> {
        let snapshot: LedgerSnapshot = read_json(&self.path)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(LedgerError::Storage(format!(
                "{} was written by a newer version (format {}, supported {})",
                self.path.display(),
                snapshot.version,
                SNAPSHOT_VERSION
            )));
        }
        info!(
            path = %self.path.display(),
            expenses = snapshot.expenses.len(),
            budgets = snapshot.budgets.len(),
            "loaded ledger"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        write_json_atomic(&self.path, snapshot)
    }
}

/// Keeps the last saved snapshot in memory.
///
/// `set_failing(true)` makes every save fail, which lets callers exercise
/// durability failures without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    stored: RefCell<LedgerSnapshot>,
    saves: Cell<usize>,
    failing: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `snapshot` already stored
    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            stored: RefCell::new(snapshot),
            ..Self::default()
        }
    }

    /// The most recently saved snapshot
    pub fn stored(&self) -> LedgerSnapshot {
        self.stored.borrow().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(self.stored())
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        if self.failing.get() {
            return Err(LedgerError::Durability(
                "in-memory store is rejecting writes".into(),
            ));
        }
        *self.stored.borrow_mut() = snapshot.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: LedgerStorage + ?Sized> LedgerStorage for &S {
    fn load(&self) -> LedgerResult<LedgerSnapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        (**self).save(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money, MonthlyBudget};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot::new(
            vec![Expense::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                "Lunch",
                Money::from_units(20),
                ExpenseCategory::Food,
            )],
            vec![MonthlyBudget::new(Money::from_units(500), 2, 2024)],
        )
    }

    #[test]
    fn test_json_storage_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("ledger.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data").join("ledger.json"));

        storage.save(&snapshot()).unwrap();

        let reopened = JsonFileStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.load().unwrap(), snapshot());
    }

    #[test]
    fn test_json_storage_rejects_newer_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"version": 99, "expenses": [], "budgets": []}"#).unwrap();

        let err = JsonFileStorage::new(path).load().unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }

    #[test]
    fn test_memory_storage_failure_toggle() {
        let storage = MemoryStorage::new();
        storage.set_failing(true);
        assert!(storage.save(&snapshot()).unwrap_err().is_durability());
        assert!(storage.stored().is_empty());

        storage.set_failing(false);
        storage.save(&snapshot()).unwrap();
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.load().unwrap(), snapshot());
    }
}
