//! Query result caching
//!
//! Pages are cached as id lists keyed by collection, store version, column
//! set and query options, so a hit is always what a fresh query would return
//! for the same snapshot. Columns are identified by key and sortability;
//! two column sets sharing keys must share accessors too.

use std::sync::Arc;

use ahash::AHashMap;
use inv_query::{Column, QueryOptions, QueryResult, Record};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    collection: String,
    /// Ordered (key, sortable) pairs; search and sort both depend on them
    columns: Vec<(String, bool)>,
    options: QueryOptions,
}

impl CacheKey {
    fn new<R>(collection: &str, columns: &[Column<R>], options: &QueryOptions) -> Self {
        Self {
            collection: collection.to_string(),
            columns: columns
                .iter()
                .map(|column| (column.key.clone(), column.sortable))
                .collect(),
            options: options.clone(),
        }
    }
}

/// Ids and counts of one result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub ids: Vec<String>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl CachedPage {
    pub fn from_result<R: Record>(result: &QueryResult<'_, R>) -> Self {
        Self {
            ids: result.ids().iter().map(ToString::to_string).collect(),
            total_count: result.total_count,
            total_pages: result.total_pages,
            page: result.page,
        }
    }
}

#[derive(Debug, Default)]
struct Entries {
    version: u64,
    pages: AHashMap<CacheKey, CachedPage>,
}

/// Bounded cache of query pages for one store version at a time
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<RwLock<Entries>>,
    /// Maximum number of pages to cache
    max_entries: usize,
}

impl QueryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            max_entries,
        }
    }

    pub fn get<R>(
        &self,
        collection: &str,
        version: u64,
        columns: &[Column<R>],
        options: &QueryOptions,
    ) -> Option<CachedPage> {
        let entries = self.entries.read();
        if entries.version != version {
            return None;
        }
        entries.pages.get(&CacheKey::new(collection, columns, options)).cloned()
    }

    pub fn put<R>(
        &self,
        collection: &str,
        version: u64,
        columns: &[Column<R>],
        options: &QueryOptions,
        page: CachedPage,
    ) {
        let mut entries = self.entries.write();
        if entries.version != version {
            debug!(from = entries.version, to = version, "store version changed, dropping cached pages");
            entries.pages.clear();
            entries.version = version;
        }

        let key = CacheKey::new(collection, columns, options);
        // Evict an arbitrary page when full
        if entries.pages.len() >= self.max_entries && !entries.pages.contains_key(&key) {
            if let Some(evict) = entries.pages.keys().next().cloned() {
                entries.pages.remove(&evict);
            }
        }
        entries.pages.insert(key, page);
    }

    /// Cached page, or `compute` it and remember the result
    pub fn get_or_insert_with<R, F>(
        &self,
        collection: &str,
        version: u64,
        columns: &[Column<R>],
        options: &QueryOptions,
        compute: F,
    ) -> CachedPage
    where
        F: FnOnce() -> CachedPage,
    {
        if let Some(page) = self.get(collection, version, columns, options) {
            return page;
        }
        let page = compute();
        if self.max_entries > 0 {
            self.put(collection, version, columns, options, page.clone());
        }
        page
    }

    pub fn len(&self) -> usize {
        self.entries.read().pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().pages.clear();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(64)
    }
}
