//! Per-table display configuration

use serde::{Deserialize, Serialize};

use crate::options::{QueryOptions, DEFAULT_PAGE_SIZE};

/// Configuration for a list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub searchable: bool,
    pub search_placeholder: String,
    pub sortable: bool,
    pub paginated: bool,
    pub page_size: usize,
    pub empty_message: String,
    pub show_border: bool,
    pub sticky_header: bool,
    /// Columns kept on narrow screens; `None` shows all of them
    pub compact_column_limit: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            searchable: false,
            search_placeholder: "検索...".to_string(),
            sortable: false,
            paginated: false,
            page_size: DEFAULT_PAGE_SIZE,
            empty_message: "データがありません".to_string(),
            show_border: true,
            sticky_header: false,
            compact_column_limit: Some(3),
        }
    }
}

impl TableConfig {
    /// Searchable, sortable and paginated: the usual list page
    pub fn interactive() -> Self {
        Self {
            searchable: true,
            sortable: true,
            paginated: true,
            ..Self::default()
        }
    }

    /// Options for the first render of this table
    pub fn options(&self) -> QueryOptions {
        QueryOptions {
            page_size: if self.paginated { self.page_size } else { 0 },
            ..QueryOptions::default()
        }
    }

    /// Drop whatever the table does not allow from caller-built options
    pub fn restrict(&self, mut options: QueryOptions) -> QueryOptions {
        if !self.searchable {
            options.search_term = None;
        }
        if !self.sortable {
            options.sort_key = None;
        }
        if !self.paginated {
            options.page = 1;
            options.page_size = 0;
        }
        options
    }
}
