//! Client-side table view engine
//!
//! Derived collections flow one way: raw records → filtered → sorted → paged.
//! Each stage is a pure function over index vectors so the raw collection is
//! never copied or reordered. [`view::TableView`] owns the records and re-runs
//! only the stages downstream of whatever changed.

pub mod column;
pub mod paginate;
pub mod resize;
pub mod search;
pub mod sort;
pub mod view;

pub use column::{ColumnKey, ColumnSpec, SortValue};
pub use paginate::{page_numbers, paginate, total_pages, PageItem, PageSize, PageState};
pub use resize::{
    ColumnWidths, DragSession, DragSurface, EventDisposition, NoopSurface, ResizeController,
    DEFAULT_MIN_WIDTH,
};
pub use search::SearchQuery;
pub use sort::{SortDirection, SortState};
pub use view::TableView;

#[cfg(test)]
pub(crate) mod fixtures;
