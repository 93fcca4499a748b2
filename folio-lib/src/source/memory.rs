//! In-memory data source.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use folio_table::Columns;
use folio_table::sort_indices;
use log::debug;

use super::DataSource;
use super::Page;
use super::PageRequest;
use crate::error::SourceError;

/// Serves a fixed record set the way a backend would: sorted by the
/// requested column, sliced to the requested page, with the total count.
///
/// Sorting uses the same stable ordering as client-computed tables, so a
/// table shows identical rows in either mode.
#[derive(Debug)]
pub struct MemorySource<R> {
    rows: Vec<R>,
    columns: Columns<R>,
    latency: Option<Duration>,
    available: AtomicBool,
}

impl<R> MemorySource<R> {
    /// Creates a source over `rows`, sortable by any sortable column in
    /// `columns`.
    pub fn new(rows: Vec<R>, columns: Columns<R>) -> Self {
        Self {
            rows,
            columns,
            latency: None,
            available: AtomicBool::new(true),
        }
    }

    /// Delays every fetch, to exercise loading states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes subsequent fetches fail with [`SourceError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl<R> DataSource<R> for MemorySource<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, request: &PageRequest) -> Result<Page<R>, SourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("source is offline".to_string()));
        }
        if request.page_size == 0 {
            return Err(SourceError::InvalidPageSize);
        }

        let order: Vec<usize> = match (request.sort.column_id(), request.sort.direction()) {
            (Some(id), Some(direction)) => {
                let column = self
                    .columns
                    .get(id)
                    .filter(|c| c.is_sortable())
                    .ok_or_else(|| SourceError::UnknownSortColumn {
                        column: id.to_string(),
                    })?;
                sort_indices(&self.rows, column, direction)
            }
            _ => (0..self.rows.len()).collect(),
        };

        let rows: Vec<R> = order
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .map(|i| self.rows[i].clone())
            .collect();

        debug!(
            "Served {} of {} rows for page {} (sort: {:?})",
            rows.len(),
            self.rows.len(),
            request.page_index,
            request.sort
        );
        Ok(Page::new(rows, self.rows.len()))
    }
}
