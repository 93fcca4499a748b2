//! Tabular data pagination and sorting engine.
//!
//! `folio-table` derives the sorted, paginated view of a row set and
//! reconciles its own transient state (current sort, current page) with
//! state the owning screen may hold instead. Sorting and pagination each run
//! in one of two [`ProcessingMode`]s:
//!
//! - [`ProcessingMode::ClientComputed`]: the engine sorts and slices the full
//!   row set itself.
//! - [`ProcessingMode::Delegated`]: the caller has already sorted/sliced the
//!   rows upstream (e.g. server-side); the engine passes them through and only
//!   tracks state and emits [`TableEvent`]s.
//!
//! # Example
//!
//! ```
//! use folio_table::{CellValue, Column, Columns, ProcessingMode, RenderInput, TableEngine, TableOptions, TableView};
//!
//! struct Position { symbol: &'static str, shares: i64 }
//!
//! let columns = Columns::new(vec![
//!     Column::new("symbol", "Symbol", |p: &Position| CellValue::from(p.symbol)),
//!     Column::new("shares", "Shares", |p: &Position| CellValue::from(p.shares)),
//! ]).unwrap();
//!
//! let options = TableOptions::default()
//!     .sorting(ProcessingMode::ClientComputed)
//!     .pagination(ProcessingMode::ClientComputed);
//! let mut table = TableEngine::new(columns, options);
//!
//! let rows = vec![
//!     Position { symbol: "MSFT", shares: 30 },
//!     Position { symbol: "AAPL", shares: 50 },
//! ];
//!
//! table.toggle_sort("symbol");
//! let TableView::Ready(page) = table.render(&rows, &RenderInput::new()) else {
//!     unreachable!()
//! };
//! assert_eq!(page.rows().get(0).map(|p| p.symbol), Some("AAPL"));
//! ```

mod column;
mod engine;
mod error;
mod event;
mod mode;
mod pagination;
mod sort;
mod value;

pub use column::{Column, Columns};
pub use engine::{
    DisplayedRows, HeaderCell, RenderInput, SortIndicator, TableEngine, TableOptions, TablePage,
    TableState, TableView,
};
pub use error::TableError;
pub use event::{EventResult, TableEvent};
pub use mode::ProcessingMode;
pub use pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, PaginationState, Paginator,
};
pub use sort::{SortDescriptor, SortDirection, Sorter, sort_indices};
pub use value::CellValue;
