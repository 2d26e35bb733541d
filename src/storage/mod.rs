//! Storage layer
//!
//! Keeps persistence out of the ledger: backends implement
//! [`LedgerStorage`], and [`PersistentLedger`] wraps a ledger to save after
//! every change.

pub mod backend;
pub mod file_io;
pub mod persistent;

pub use backend::{JsonFileStorage, LedgerStorage, MemoryStorage};
pub use file_io::{read_json, write_json_atomic};
pub use persistent::PersistentLedger;
