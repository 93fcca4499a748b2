//! Data sources for delegated tables.
//!
//! A delegated table does not sort or slice rows itself. Its owner turns the
//! table state into a [`PageRequest`], hands it to a [`DataSource`] and renders
//! whatever [`Page`] comes back, together with the reported total count.

mod loader;
mod memory;

use async_trait::async_trait;
use folio_table::SortDescriptor;
use folio_table::TableState;

use crate::error::SourceError;

pub use loader::TableLoader;
pub use memory::MemorySource;

/// What one fetch asks for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
    pub sort: SortDescriptor,
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
            sort: SortDescriptor::Unsorted,
        }
    }

    /// Sets the sort order.
    pub fn with_sort(mut self, sort: SortDescriptor) -> Self {
        self.sort = sort;
        self
    }

    /// Index of the first requested row.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

impl From<&TableState> for PageRequest {
    fn from(state: &TableState) -> Self {
        Self {
            page_index: state.pagination.page_index,
            page_size: state.pagination.page_size,
            sort: state.sort.clone(),
        }
    }
}

/// One page of rows with the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    rows: Vec<R>,
    total_count: usize,
}

impl<R> Page<R> {
    pub fn new(rows: Vec<R>, total_count: usize) -> Self {
        Self { rows, total_count }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Number of rows across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }
}

/// Something that can serve pages of `R`.
#[async_trait]
pub trait DataSource<R>: Send + Sync {
    /// Fetches the rows of one page, sorted as requested.
    async fn fetch(&self, request: &PageRequest) -> Result<Page<R>, SourceError>;
}
