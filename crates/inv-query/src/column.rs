//! Column and row-action descriptors

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Extracts the display value of a column from a record
pub type Accessor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Horizontal alignment of a column's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Describes one column of a table
pub struct Column<R> {
    /// Unique key within a column set, referenced by `QueryOptions::sort_key`
    pub key: String,
    /// Header text
    pub label: String,
    /// Whether clicking the header may sort by this column
    pub sortable: bool,
    pub align: Align,
    /// Size hint for the renderer, e.g. `"120px"`
    pub width: Option<String>,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    /// Create a column whose value is anything printable
    pub fn new<F, V>(key: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        R: 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: ToString + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            align: Align::Left,
            width: None,
            accessor: Arc::new(move |record| accessor(record).to_string()),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Display value of this column for `record`
    pub fn value(&self, record: &R) -> String {
        (self.accessor)(record)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            align: self.align,
            width: self.width.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("width", &self.width)
            .finish()
    }
}

/// Returns the first key that appears twice, if any
pub(crate) fn duplicate_key<R>(columns: &[Column<R>]) -> Option<&str> {
    let mut seen = AHashSet::new();
    columns
        .iter()
        .find(|column| !seen.insert(column.key.as_str()))
        .map(|column| column.key.as_str())
}

/// An ordered set of columns with unique keys
pub struct ColumnSet<R> {
    columns: Vec<Column<R>>,
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<R> ColumnSet<R> {
    /// Build a column set, rejecting duplicate keys
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, QueryError> {
        if let Some(key) = duplicate_key(&columns) {
            return Err(QueryError::DuplicateColumnKey(key.to_string()));
        }
        Ok(Self { columns })
    }

    /// Look up a column by key
    pub fn get(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn as_slice(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns shown on a narrow layout: the first `limit`, or all when `None`
    pub fn visible(&self, limit: Option<usize>) -> &[Column<R>] {
        match limit {
            Some(limit) => &self.columns[..limit.min(self.columns.len())],
            None => &self.columns,
        }
    }
}

/// A row-level operation offered by the host UI
///
/// The engine never calls these; they travel alongside the column set so the
/// renderer can build a per-row menu.
pub struct Action<R> {
    pub label: String,
    /// Optional colour hint, e.g. `"red"` for destructive actions
    pub color: Option<String>,
    handler: Arc<dyn Fn(&R) + Send + Sync>,
    enabled: Option<Arc<dyn Fn(&R) -> bool + Send + Sync>>,
}

impl<R> Action<R> {
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            color: None,
            handler: Arc::new(handler),
            enabled: None,
        }
    }

    /// Only offer the action for rows matching `predicate`
    pub fn enabled_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.enabled = Some(Arc::new(predicate));
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn is_enabled(&self, record: &R) -> bool {
        self.enabled.as_ref().map_or(true, |predicate| predicate(record))
    }

    /// Run the handler if the action is enabled for `record`
    pub fn invoke(&self, record: &R) -> bool {
        if !self.is_enabled(record) {
            return false;
        }
        (self.handler)(record);
        true
    }
}

impl<R> Clone for Action<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            color: self.color.clone(),
            handler: Arc::clone(&self.handler),
            enabled: self.enabled.clone(),
        }
    }
}

impl<R> fmt::Debug for Action<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("color", &self.color)
            .field("has_predicate", &self.enabled.is_some())
            .finish()
    }
}
