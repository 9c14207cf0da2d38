//! In-memory tabular query engine
//!
//! Every list view of the dashboard runs its rows through the same pipeline:
//! search, then sort, then paginate. The engine is generic over the record
//! type and only ever looks at a record through the [`Column`] accessors the
//! caller hands in.

pub mod collate;
pub mod column;
pub mod config;
pub mod engine;
pub mod options;

use std::fmt::Display;
use std::hash::Hash;

use thiserror::Error;

// Re-exports
pub use collate::locale_cmp;
pub use column::{Action, Align, Column, ColumnSet};
pub use config::TableConfig;
pub use engine::{query, QueryResult};
pub use options::{QueryOptions, SortDirection, DEFAULT_PAGE_SIZE};

/// A row that can be shown in a table
pub trait Record {
    /// Stable, unique identifier type
    type Id: Clone + Eq + Hash + Display;

    /// Identifier of this record
    fn id(&self) -> Self::Id;
}

/// Errors raised while wiring up a table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),
}
