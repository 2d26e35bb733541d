//! Records ledger changes in the audit log
//!
//! Logging failures never reach the ledger; they are reported through
//! `tracing` and the change stands.

use tracing::warn;

use super::log::AuditLog;
use super::record::{AuditRecord, LedgerChange};
use crate::ledger::{Ledger, LedgerEvent, LedgerObserver};

/// Ledger observer that appends one record per change
#[derive(Debug, Clone)]
pub struct AuditObserver {
    log: AuditLog,
}

impl AuditObserver {
    pub fn new(log: AuditLog) -> Self {
        Self { log }
    }
}

impl LedgerObserver for AuditObserver {
    fn ledger_changed(&mut self, event: &LedgerEvent, _ledger: &Ledger) {
        let Some(change) = LedgerChange::from_event(event) else {
            return;
        };
        if let Err(err) = self.log.append(&AuditRecord::now(change)) {
            warn!(error = %err, event = event.kind(), "failed to write audit record");
        }
    }
}
