//! Fetch driver for delegated tables.

use std::sync::Arc;

use folio_table::RenderInput;
use log::debug;
use log::warn;

use super::DataSource;
use super::PageRequest;
use crate::error::SourceError;

/// Holds the rows of the page a delegated table is showing and refetches
/// them when the table state changes.
///
/// A failed fetch leaves the table with no rows rather than stale ones; the
/// error is logged and kept for display.
pub struct TableLoader<R> {
    source: Arc<dyn DataSource<R>>,
    rows: Vec<R>,
    total_count: usize,
    loading: bool,
    request: Option<PageRequest>,
    last_error: Option<SourceError>,
}

impl<R> TableLoader<R> {
    pub fn new(source: Arc<dyn DataSource<R>>) -> Self {
        Self {
            source,
            rows: Vec::new(),
            total_count: 0,
            loading: false,
            request: None,
            last_error: None,
        }
    }

    /// Rows of the last completed fetch.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Total count reported by the last completed fetch.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The request the current rows answer.
    pub fn request(&self) -> Option<&PageRequest> {
        self.request.as_ref()
    }

    /// Error of the last fetch, if it failed.
    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    /// Whether `request` differs from what the current rows answer.
    pub fn is_stale(&self, request: &PageRequest) -> bool {
        self.request.as_ref() != Some(request)
    }

    /// Marks a fetch as started, so the table can show its loading state.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Fetches a page, replacing the current rows.
    pub async fn load(&mut self, request: PageRequest) {
        self.loading = true;
        match self.source.fetch(&request).await {
            Ok(page) => {
                debug!(
                    "Loaded {} rows (total {}) for {:?}",
                    page.rows().len(),
                    page.total_count(),
                    request
                );
                self.total_count = page.total_count();
                self.rows = page.into_rows();
                self.last_error = None;
            }
            Err(e) => {
                warn!("Fetch failed for {:?}: {}", request, e);
                self.rows.clear();
                self.total_count = 0;
                self.last_error = Some(e);
            }
        }
        self.request = Some(request);
        self.loading = false;
    }

    /// Fetches only if `request` differs from the current one.
    pub async fn refresh(&mut self, request: PageRequest) {
        if self.is_stale(&request) {
            self.load(request).await;
        }
    }

    /// Authoritative values for the next render of the table.
    ///
    /// While a fetch is in flight only the loading flag is reported, so the
    /// table keeps the page and sort it just requested.
    pub fn render_input(&self) -> RenderInput {
        let mut input = RenderInput::new()
            .loading(self.loading)
            .total_items(self.total_count);
        if self.loading {
            return input;
        }
        if let Some(request) = &self.request {
            input = input
                .current_page(request.page_index)
                .page_size(request.page_size)
                .sort(request.sort.clone());
        }
        input
    }
}
