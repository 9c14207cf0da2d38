//! Search, sort and paginate a record collection
//!
//! The stages always run in that order and each one works on the output of
//! the previous. A missing option turns its stage into a no-op. Nothing is
//! kept between calls: the same inputs always produce the same page.

use tracing::{debug, warn};

use crate::collate::locale_cmp;
use crate::column::{duplicate_key, Column};
use crate::options::{QueryOptions, SortDirection};
use crate::Record;

/// One page of a query plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a, R> {
    /// Rows of the requested page, borrowed from the input collection
    pub rows: Vec<&'a R>,
    /// Rows matching the search, before slicing
    pub total_count: usize,
    pub total_pages: usize,
    /// 1-based page this result was cut for
    pub page: usize,
    /// Effective page size; 0 means the whole result is one page
    pub page_size: usize,
}

impl<'a, R> QueryResult<'a, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first and last row shown, for "N件中 a-b件を表示"
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = if self.page_size == 0 {
            1
        } else {
            (self.page - 1) * self.page_size + 1
        };
        Some((first, first + self.rows.len() - 1))
    }

    /// Identifiers of the rows on this page, in order
    pub fn ids(&self) -> Vec<R::Id>
    where
        R: Record,
    {
        self.rows.iter().map(|row| row.id()).collect()
    }

    pub fn to_owned_rows(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.rows.iter().map(|row| (*row).clone()).collect()
    }
}

/// Run the search → sort → paginate pipeline over `records`
pub fn query<'a, R>(
    records: &'a [R],
    columns: &[Column<R>],
    options: &QueryOptions,
) -> QueryResult<'a, R> {
    if let Some(key) = duplicate_key(columns) {
        debug_assert!(false, "duplicate column key `{key}`");
        warn!(key, "duplicate column key; the first column with this key wins");
    }

    let mut rows = search(records, columns, options.active_search());
    sort(&mut rows, columns, options.sort_key.as_deref(), options.sort_direction);
    let result = paginate(rows, options.page, options.page_size);

    debug!(
        input = records.len(),
        matched = result.total_count,
        page = result.page,
        total_pages = result.total_pages,
        "table query"
    );
    result
}

/// Keep records where any column's value contains `term`, ignoring case
pub fn search<'a, R>(records: &'a [R], columns: &[Column<R>], term: Option<&str>) -> Vec<&'a R> {
    let needle = match term {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return records.iter().collect(),
    };

    records
        .iter()
        .filter(|record| {
            columns
                .iter()
                .any(|column| column.value(record).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by a sortable column's display value
///
/// Unknown or non-sortable keys leave the order untouched.
pub fn sort<R>(rows: &mut Vec<&R>, columns: &[Column<R>], key: Option<&str>, direction: SortDirection) {
    let Some(key) = key else {
        return;
    };
    let Some(column) = columns.iter().find(|column| column.key == key) else {
        debug!(key, "sort key names no column; keeping input order");
        return;
    };
    if !column.sortable {
        debug!(key, "column is not sortable; keeping input order");
        return;
    }

    // Extract each value once; the comparator runs O(n log n) times.
    let mut keyed: Vec<(String, &R)> = rows.drain(..).map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => locale_cmp(a, b),
        SortDirection::Desc => locale_cmp(b, a),
    });
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

/// Slice out one page
///
/// `page` 0 is treated as page 1. `page_size` 0 returns everything as a
/// single page. Pages past the end come back empty.
pub fn paginate<R>(rows: Vec<&R>, page: usize, page_size: usize) -> QueryResult<'_, R> {
    let total_count = rows.len();
    let page = page.max(1);

    if page_size == 0 {
        let total_pages = usize::from(total_count > 0);
        let rows = if page == 1 { rows } else { Vec::new() };
        return QueryResult {
            rows,
            total_count,
            total_pages,
            page,
            page_size,
        };
    }

    let total_pages = total_count.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let rows = if start >= total_count {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_count);
        rows[start..end].to_vec()
    };

    QueryResult {
        rows,
        total_count,
        total_pages,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, ColumnSet};
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        stock: u32,
    }

    impl Record for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn row(id: u32, name: &str, stock: u32) -> Row {
        Row {
            id,
            name: name.to_string(),
            stock,
        }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "商品名", |r: &Row| r.name.clone()).sortable(),
            Column::new("stock", "在庫数", |r: &Row| r.stock)
                .sortable()
                .align(Align::Right),
            Column::new("id", "ID", |r: &Row| r.id),
        ]
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, "Tomato", 12),
            row(2, "onion", 3),
            row(3, "Beef sirloin", 120),
            row(4, "Tomato paste", 3),
            row(5, "salt", 40),
        ]
    }

    #[test]
    fn test_empty_collection() {
        let rows: Vec<Row> = Vec::new();
        let result = query(&rows, &columns(), &QueryOptions::default());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.is_empty());
        assert_eq!(result.display_range(), None);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_columns() {
        let rows = sample();
        let result = query(&rows, &columns(), &QueryOptions::new().with_search("TOMATO"));
        assert_eq!(result.ids(), vec![1, 4]);

        // matches the numeric stock column too
        let result = query(&rows, &columns(), &QueryOptions::new().with_search("120"));
        assert_eq!(result.ids(), vec![3]);
    }

    #[test]
    fn test_sort_uses_locale_order() {
        let rows = sample();
        let options = QueryOptions::new().with_sort("stock", SortDirection::Asc);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.ids(), vec![2, 4, 1, 5, 3]);

        let options = QueryOptions::new().with_sort("name", SortDirection::Desc);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.ids(), vec![4, 1, 5, 2, 3]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let rows = sample();
        let options = QueryOptions::new().with_sort("stock", SortDirection::Desc);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.ids(), vec![3, 5, 1, 2, 4]);
    }

    #[test]
    fn test_unknown_or_unsortable_key_is_noop() {
        let rows = sample();
        let options = QueryOptions::new().with_sort("missing", SortDirection::Desc);
        assert_eq!(query(&rows, &columns(), &options).ids(), vec![1, 2, 3, 4, 5]);

        let options = QueryOptions::new().with_sort("id", SortDirection::Desc);
        assert_eq!(query(&rows, &columns(), &options).ids(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pagination_window() {
        let rows = sample();
        let options = QueryOptions::new().with_page_size(2).with_page(2);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.ids(), vec![3, 4]);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.display_range(), Some((3, 4)));
        assert!(result.has_prev());
        assert!(result.has_next());

        let options = QueryOptions::new().with_page_size(2).with_page(3);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.ids(), vec![5]);
        assert!(!result.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let rows = sample();
        let options = QueryOptions::new().with_page_size(2).with_page(9);
        let result = query(&rows, &columns(), &options);
        assert!(result.is_empty());
        assert_eq!(result.total_count, 5);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_zero_page_size_disables_pagination() {
        let rows = sample();
        let result = query(&rows, &columns(), &QueryOptions::unpaginated());
        assert_eq!(result.rows.len(), 5);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.display_range(), Some((1, 5)));
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let rows = sample();
        let options = QueryOptions::new().with_page_size(2).with_page(0);
        let result = query(&rows, &columns(), &options);
        assert_eq!(result.page, 1);
        assert_eq!(result.ids(), vec![1, 2]);
    }

    #[test]
    fn test_works_with_column_set() {
        let rows = sample();
        let set = ColumnSet::new(columns()).unwrap();
        let result = query(&rows, set.as_slice(), &QueryOptions::new().with_search("salt"));
        assert_eq!(result.to_owned_rows(), vec![row(5, "salt", 40)]);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(("[a-cA-C]{0,3}", 0u32..5), 0..40).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(idx, (name, stock))| row(idx as u32, &name, stock))
                .collect()
        })
    }

    fn arb_options() -> impl Strategy<Value = QueryOptions> {
        (
            prop::option::of("[a-cA-C0-4]{0,2}"),
            prop::option::of(prop_oneof![Just("name"), Just("stock"), Just("id"), Just("nope")]),
            any::<bool>(),
            0usize..6,
            0usize..7,
        )
            .prop_map(|(search, key, desc, page, page_size)| QueryOptions {
                search_term: search,
                sort_key: key.map(str::to_string),
                sort_direction: if desc { SortDirection::Desc } else { SortDirection::Asc },
                page,
                page_size,
            })
    }

    proptest! {
        #[test]
        fn idempotent(rows in arb_rows(), options in arb_options()) {
            let cols = columns();
            let first = query(&rows, &cols, &options);
            let second = query(&rows, &cols, &options);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn stable_on_equal_keys(rows in arb_rows(), desc in any::<bool>()) {
            let cols = columns();
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let options = QueryOptions::unpaginated().with_sort("stock", direction);
            let result = query(&rows, &cols, &options);
            for pair in result.rows.windows(2) {
                if pair[0].stock == pair[1].stock {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn pages_cover_filtered_sequence(rows in arb_rows(), options in arb_options(), page_size in 1usize..7) {
            let cols = columns();
            let whole = query(&rows, &cols, &options.clone().with_page_size(0).with_page(1));
            let mut stitched = Vec::new();
            let total_pages = query(&rows, &cols, &options.clone().with_page_size(page_size)).total_pages;
            for page in 1..=total_pages {
                let result = query(&rows, &cols, &options.clone().with_page_size(page_size).with_page(page));
                stitched.extend(result.ids());
            }
            prop_assert_eq!(stitched, whole.ids());
        }

        #[test]
        fn empty_search_returns_everything(rows in arb_rows()) {
            let cols = columns();
            let options = QueryOptions::unpaginated().with_search("");
            let result = query(&rows, &cols, &options);
            prop_assert_eq!(result.total_count, rows.len());
            let expected: Vec<u32> = rows.iter().map(|r| r.id).collect();
            prop_assert_eq!(result.ids(), expected);
        }
    }
}
