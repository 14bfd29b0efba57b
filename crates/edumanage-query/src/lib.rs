//! Read-only views over the record store.
//!
//! Filtering, numeric-aware sorting, pagination, display rows with derived
//! join columns, and dashboard statistics. Nothing here mutates the store.

pub mod filter;
pub mod page;
pub mod query;
pub mod sort;
pub mod stats;
pub mod view;

pub use filter::filter;
pub use page::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES, Page, Pager, clamp_page, page_size_for_height, paginate,
    total_pages,
};
pub use query::{Query, run_query};
pub use sort::{SortDirection, SortState, compare_cells, sort_by_cell, sort_records};
pub use stats::{Count, Stats, Totals, collect_stats};
pub use view::{Column, Row, TableView, resolve_college};
