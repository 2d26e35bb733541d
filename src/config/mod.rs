//! Configuration module
//!
//! Data directory resolution and persisted user preferences.

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
