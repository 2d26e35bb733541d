//! Persistence decorator for the ledger
//!
//! `PersistentLedger` exposes the ledger's mutation set and writes a snapshot
//! to its backend after each committed change. The in-memory ledger stays
//! authoritative: if a write fails the change is kept, the ledger is marked
//! dirty, and the caller gets [`LedgerError::Durability`]. The next
//! successful [`PersistentLedger::flush`] (explicit, or triggered by the next
//! mutation) catches storage up.

use tracing::{debug, warn};

use super::backend::LedgerStorage;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Ledger, LedgerObserver, SubscriptionId};
use crate::models::{Expense, ExpenseId, ExpensePatch, MonthlyBudget};

/// A [`Ledger`] paired with the storage it is saved to
#[derive(Debug)]
pub struct PersistentLedger<S> {
    ledger: Ledger,
    storage: S,
    autosave: bool,
    dirty: bool,
}

impl<S: LedgerStorage> PersistentLedger<S> {
    /// Load the ledger from `storage`.
    ///
    /// With `autosave` off, changes accumulate until [`Self::flush`].
    pub fn open(storage: S, autosave: bool) -> LedgerResult<Self> {
        let snapshot = storage.load()?;
        Ok(Self {
            ledger: Ledger::from_snapshot(snapshot),
            storage,
            autosave,
            dirty: false,
        })
    }

    /// Read access for queries
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True when in-memory changes have not reached storage yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: LedgerObserver + 'static,
    {
        self.ledger.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ledger.unsubscribe(id)
    }

    pub fn add_expense(&mut self, expense: Expense) -> LedgerResult<()> {
        self.ledger.add_expense(expense);
        self.committed()
    }

    /// See [`Ledger::update_expense`]. An unknown id writes nothing.
    pub fn update_expense(&mut self, id: ExpenseId, patch: ExpensePatch) -> LedgerResult<bool> {
        let found = self.ledger.update_expense(id, patch);
        if found {
            self.committed()?;
        }
        Ok(found)
    }

    /// See [`Ledger::delete_expense`]. An unknown id writes nothing.
    pub fn delete_expense(&mut self, id: ExpenseId) -> LedgerResult<bool> {
        let found = self.ledger.delete_expense(id);
        if found {
            self.committed()?;
        }
        Ok(found)
    }

    pub fn set_budget(&mut self, budget: MonthlyBudget) -> LedgerResult<Option<MonthlyBudget>> {
        let previous = self.ledger.set_budget(budget);
        self.committed()?;
        Ok(previous)
    }

    /// Discard in-memory state and load again from storage
    pub fn reload(&mut self) -> LedgerResult<()> {
        let snapshot = self.storage.load()?;
        self.ledger.replace_all(snapshot);
        self.dirty = false;
        Ok(())
    }

    /// Write the current state if there are unsaved changes
    pub fn flush(&mut self) -> LedgerResult<()> {
        if !self.dirty {
            return Ok(());
        }
        match self.storage.save(&self.ledger.snapshot()) {
            Ok(()) => {
                self.dirty = false;
                debug!("ledger flushed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "ledger change kept in memory but not persisted");
                Err(match err {
                    LedgerError::Durability(msg) => LedgerError::Durability(msg),
                    other => LedgerError::Durability(other.to_string()),
                })
            }
        }
    }

    /// Give back the ledger and the storage backend
    pub fn into_parts(self) -> (Ledger, S) {
        (self.ledger, self.storage)
    }

    fn committed(&mut self) -> LedgerResult<()> {
        self.dirty = true;
        if self.autosave {
            self.flush()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerSnapshot;
    use crate::models::{ExpenseCategory, Money};
    use crate::storage::backend::{JsonFileStorage, MemoryStorage};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn lunch() -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            "Lunch",
            Money::from_units(20),
            ExpenseCategory::Food,
        )
    }

    #[test]
    fn test_each_mutation_is_saved() {
        let storage = MemoryStorage::new();
        let mut ledger = PersistentLedger::open(&storage, true).unwrap();

        let e = lunch();
        ledger.add_expense(e.clone()).unwrap();
        ledger
            .set_budget(MonthlyBudget::new(Money::from_units(500), 2, 2024))
            .unwrap();
        ledger
            .update_expense(e.id, ExpensePatch::new().amount(Money::from_units(22)))
            .unwrap();

        assert_eq!(storage.save_count(), 3);
        assert_eq!(storage.stored(), ledger.ledger().snapshot());
        assert!(!ledger.is_dirty());
    }

    #[test]
    fn test_no_op_mutations_do_not_write() {
        let storage = MemoryStorage::new();
        let mut ledger = PersistentLedger::open(&storage, true).unwrap();

        assert!(!ledger.delete_expense(ExpenseId::new()).unwrap());
        assert!(!ledger
            .update_expense(ExpenseId::new(), ExpensePatch::new())
            .unwrap());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_durability_failure_keeps_memory_state() {
        let storage = MemoryStorage::new();
        let mut ledger = PersistentLedger::open(&storage, true).unwrap();
        storage.set_failing(true);

        let e = lunch();
        let err = ledger.add_expense(e.clone()).unwrap_err();

        assert!(err.is_durability());
        assert!(ledger.is_dirty());
        assert_eq!(ledger.ledger().daily_expenses(e.date).len(), 1);
        assert!(storage.stored().is_empty());

        storage.set_failing(false);
        ledger.flush().unwrap();
        assert!(!ledger.is_dirty());
        assert_eq!(storage.stored().expenses, vec![e]);
    }

    #[test]
    fn test_manual_flush_mode() {
        let storage = MemoryStorage::new();
        let mut ledger = PersistentLedger::open(&storage, false).unwrap();

        ledger.add_expense(lunch()).unwrap();
        ledger.add_expense(lunch()).unwrap();
        assert_eq!(storage.save_count(), 0);
        assert!(ledger.is_dirty());

        ledger.flush().unwrap();
        ledger.flush().unwrap();
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.stored().expenses.len(), 2);
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let storage = MemoryStorage::with_snapshot(LedgerSnapshot::new(vec![lunch()], vec![]));
        let mut ledger = PersistentLedger::open(&storage, false).unwrap();

        ledger.add_expense(lunch()).unwrap();
        assert_eq!(ledger.ledger().expenses().len(), 2);

        ledger.reload().unwrap();
        assert_eq!(ledger.ledger().expenses().len(), 1);
        assert!(!ledger.is_dirty());
    }

    #[test]
    fn test_json_file_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let e = lunch();

        {
            let mut ledger = PersistentLedger::open(JsonFileStorage::new(path.clone()), true).unwrap();
            ledger.add_expense(e.clone()).unwrap();
            ledger
                .set_budget(MonthlyBudget::new(Money::from_units(500), 2, 2024))
                .unwrap();
        }

        let reopened = PersistentLedger::open(JsonFileStorage::new(path), true).unwrap();
        assert_eq!(reopened.ledger().expense(e.id), Some(&e));
        assert_eq!(
            reopened.ledger().total_expenses(2, 2024),
            Money::from_units(20)
        );
        assert!(reopened.ledger().monthly_budget(2, 2024).is_some());
    }
}
