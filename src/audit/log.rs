//! Append-only JSONL file of [`AuditRecord`]s

use std::fs::{self, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde_json::Deserializer;

use super::record::AuditRecord;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line
    pub fn append(&self, record: &AuditRecord) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LedgerError::Io(format!("Failed to create log directory: {}", e)))?;
        }

        let mut line = serde_json::to_string(record)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize audit record: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(line.as_bytes())
            .map_err(|e| LedgerError::Io(format!("Failed to write audit log: {}", e)))
    }

    /// Every record, oldest first. A missing file is an empty log.
    pub fn records(&self) -> LedgerResult<Vec<AuditRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::Io(format!("Failed to open audit log: {}", e))),
        };

        Deserializer::from_reader(BufReader::new(file))
            .into_iter::<AuditRecord>()
            .map(|record| {
                record.map_err(|e| {
                    LedgerError::Json(format!("Corrupt audit log at line {}: {}", e.line(), e))
                })
            })
            .collect()
    }

    /// The last `count` records, oldest first
    pub fn recent(&self, count: usize) -> LedgerResult<Vec<AuditRecord>> {
        let mut records = self.records()?;
        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }

    /// Records touching any expense whose id starts with `id_prefix`
    ///
    /// Matching runs against the log, not the ledger, so removed expenses
    /// still have a history. Accepts the same forms as the CLI: a full id,
    /// `exp-550e8400`, or a bare hex prefix.
    pub fn history(&self, id_prefix: &str) -> LedgerResult<Vec<AuditRecord>> {
        let trimmed = id_prefix.trim();
        let prefix = trimmed
            .strip_prefix("exp-")
            .unwrap_or(trimmed)
            .replace('-', "")
            .to_lowercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LedgerError::Validation(format!(
                "Invalid expense id: '{}'",
                id_prefix
            )));
        }

        Ok(self
            .records()?
            .into_iter()
            .filter(|record| {
                record.change.expense_id().is_some_and(|id| {
                    id.as_uuid().simple().to_string().starts_with(&prefix)
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::record::LedgerChange;
    use crate::models::{Expense, ExpenseCategory, ExpenseId, Money, MonthlyBudget};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> AuditLog {
        AuditLog::new(dir.path().join("audit.log"))
    }

    fn added(id: &str, description: &str) -> AuditRecord {
        let expense = Expense::with_id(
            id.parse::<ExpenseId>().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            description,
            Money::from_units(10),
            ExpenseCategory::Food,
        );
        AuditRecord::now(LedgerChange::ExpenseAdded { expense })
    }

    fn budget(units: i64) -> AuditRecord {
        AuditRecord::now(LedgerChange::BudgetSet {
            previous: None,
            budget: MonthlyBudget::new(Money::from_units(units), 2, 2024),
        })
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        assert!(log.records().unwrap().is_empty());
        assert!(log.recent(5).unwrap().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn test_append_and_recent() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        for units in 1..=5 {
            log.append(&budget(units)).unwrap();
        }

        let amounts: Vec<_> = log
            .recent(2)
            .unwrap()
            .into_iter()
            .map(|r| match r.change {
                LedgerChange::BudgetSet { budget, .. } => budget.amount,
                other => panic!("unexpected change {:?}", other),
            })
            .collect();
        assert_eq!(amounts, vec![Money::from_units(4), Money::from_units(5)]);
        assert_eq!(log.recent(100).unwrap().len(), 5);

        let text = fs::read_to_string(log.path()).unwrap();
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("nested").join("audit.log"));
        log.append(&budget(1)).unwrap();
        assert_eq!(log.records().unwrap().len(), 1);
    }

    #[test]
    fn test_history_matches_expense_prefix() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&added("550e8400-e29b-41d4-a716-446655440000", "Coffee"))
            .unwrap();
        log.append(&budget(100)).unwrap();
        log.append(&added("660e8400-e29b-41d4-a716-446655440000", "Tea"))
            .unwrap();

        let history = log.history("exp-550e8400").unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].change.summary().contains("Coffee"));

        assert!(log.history("77").unwrap().is_empty());
        assert!(log.history("not-hex").unwrap_err().is_validation());
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&budget(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "{{\"at\": 7}}").unwrap();

        let err = log.records().unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }
}
