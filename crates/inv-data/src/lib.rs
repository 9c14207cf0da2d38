//! Data access for the inventory dashboard
//!
//! Collections reach the query engine and the calculator through the
//! [`InventoryProvider`] trait. [`InventoryStore`] is the in-memory
//! implementation; fixture bundles and CSV imports fill it.

pub mod cache;
pub mod config;
pub mod index;
pub mod provider;
pub mod sources;
pub mod store;

use inv_core::OrderError;
use thiserror::Error;

// Re-exports
pub use cache::{CachedPage, QueryCache};
pub use config::{BlankValues, ConfigError, Settings};
pub use index::ProductIndex;
pub use provider::InventoryProvider;
pub use sources::{CsvImport, FixtureSet};
pub use store::InventoryStore;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("unknown order: {0}")]
    UnknownOrder(String),

    #[error("stocktaking {0} is already completed")]
    StocktakingCompleted(String),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
