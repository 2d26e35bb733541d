//! In-memory ledger: the expense and budget collections, their derived
//! queries, and change notification.

pub mod observer;
pub mod snapshot;
pub mod store;

pub use observer::{LedgerEvent, LedgerObserver, SubscriptionId};
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
pub use store::Ledger;
