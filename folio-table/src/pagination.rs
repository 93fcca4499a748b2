//! Pagination state reconciler.

use std::ops::Range;

use log::{debug, warn};
use serde::Deserialize;
use serde::Serialize;

use crate::event::TableEvent;
use crate::mode::ProcessingMode;

/// Page size used when none (or an invalid one) is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered when the caller does not declare its own.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [10, 20, 50];

/// Current page of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, always greater than zero.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Holds `{page_index, page_size}` and the item count they are measured
/// against.
///
/// Out-of-range requests are clamped, never rejected. The page count is
/// `ceil(total_items / page_size)` unless the caller supplies an explicit
/// override; with no items there are no pages and navigation is disabled.
///
/// Every accepted mutation returns the events it produced, exactly one per
/// distinct change. A page-size change always resets to the first page and
/// reports both the new size and `PageChanged { page_index: 0 }`.
#[derive(Debug, Clone)]
pub struct Paginator {
    mode: ProcessingMode,
    enabled: bool,
    state: PaginationState,
    page_size_options: Vec<usize>,
    total_items: usize,
    page_count_override: Option<usize>,
}

impl Paginator {
    /// Create a paginator on the first page.
    ///
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(
        mode: ProcessingMode,
        enabled: bool,
        page_size: usize,
        page_size_options: Vec<usize>,
    ) -> Self {
        let page_size = if page_size == 0 {
            warn!(
                "Page size 0 is invalid, using default of {}",
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            mode,
            enabled,
            state: PaginationState {
                page_index: 0,
                page_size,
            },
            page_size_options,
            total_items: 0,
            page_count_override: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Processing mode.
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Whether pagination is enabled for the table at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current state.
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Current zero-based page index.
    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Declared page size options. Informational only.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Item count the page count is derived from.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Update the item count.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
    }

    /// Set or clear an explicit page count supplied by the caller.
    ///
    /// An override of zero counts as absent.
    pub fn set_page_count_override(&mut self, page_count: Option<usize>) {
        self.page_count_override = page_count.filter(|&count| count > 0);
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        if let Some(count) = self.page_count_override {
            return count;
        }
        if self.total_items == 0 {
            0
        } else {
            self.total_items.div_ceil(self.state.page_size)
        }
    }

    /// Whether a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.enabled && self.page_count() > 0 && self.state.page_index > 0
    }

    /// Whether a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.enabled && self.state.page_index.saturating_add(1) < self.page_count()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move to a page, clamping the index into `[0, page_count - 1]`.
    ///
    /// Ignored when there are no pages or the index is already current.
    pub fn set_page_index(&mut self, page_index: usize) -> Vec<TableEvent> {
        let page_count = self.page_count();
        if !self.enabled || page_count == 0 {
            debug!("Ignoring page change to {}: navigation disabled", page_index);
            return vec![];
        }

        let target = page_index.min(page_count - 1);
        if target != page_index {
            debug!(
                "Clamped page index {} to {} ({} pages)",
                page_index, target, page_count
            );
        }
        if target == self.state.page_index {
            return vec![];
        }

        self.state.page_index = target;
        vec![TableEvent::PageChanged { page_index: target }]
    }

    /// Change the page size and return to the first page.
    ///
    /// Zero is ignored. Sizes outside the declared options are accepted but
    /// logged.
    pub fn set_page_size(&mut self, page_size: usize) -> Vec<TableEvent> {
        if !self.enabled {
            return vec![];
        }
        if page_size == 0 {
            warn!("Ignoring page size 0");
            return vec![];
        }
        if page_size == self.state.page_size {
            return vec![];
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&page_size) {
            warn!(
                "Page size {} is not one of the declared options {:?}",
                page_size, self.page_size_options
            );
        }

        self.state = PaginationState {
            page_index: 0,
            page_size,
        };
        vec![
            TableEvent::PageSizeChanged { page_size },
            TableEvent::PageChanged { page_index: 0 },
        ]
    }

    /// Advance one page. No-op on the last page.
    pub fn next_page(&mut self) -> Vec<TableEvent> {
        if !self.can_next_page() {
            return vec![];
        }
        self.set_page_index(self.state.page_index + 1)
    }

    /// Go back one page. No-op on the first page.
    pub fn previous_page(&mut self) -> Vec<TableEvent> {
        if !self.can_previous_page() {
            return vec![];
        }
        self.set_page_index(self.state.page_index - 1)
    }

    /// Jump to the first page.
    pub fn first_page(&mut self) -> Vec<TableEvent> {
        self.set_page_index(0)
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) -> Vec<TableEvent> {
        match self.page_count() {
            0 => vec![],
            count => self.set_page_index(count - 1),
        }
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Adopt authoritative values supplied by the owning screen.
    ///
    /// No events: the owner is the source of these values. A zero page size is
    /// ignored.
    pub fn sync(&mut self, page_index: Option<usize>, page_size: Option<usize>) {
        if let Some(size) = page_size {
            if size == 0 {
                warn!("Ignoring external page size 0");
            } else {
                self.state.page_size = size;
            }
        }
        if let Some(index) = page_index {
            self.state.page_index = index;
        }
    }

    /// Pull the page index back into range after the item count shrank.
    ///
    /// Returns `true` if the index moved. No event is produced.
    pub fn clamp_page_index(&mut self) -> bool {
        let last = self.page_count().saturating_sub(1);
        if self.state.page_index > last {
            debug!(
                "Page index {} out of range, clamping to {}",
                self.state.page_index, last
            );
            self.state.page_index = last;
            return true;
        }
        false
    }

    /// Index range of the current page within a sequence of `len` rows.
    pub fn slice_range(&self, len: usize) -> Range<usize> {
        let start = self
            .state
            .page_index
            .saturating_mul(self.state.page_size)
            .min(len);
        let end = start.saturating_add(self.state.page_size).min(len);
        start..end
    }

    /// One-based `(first, last)` item numbers shown on the current page, for
    /// a "Showing 11 to 12 of 12 results" footer.
    ///
    /// `None` when the current page holds no items.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        let range = self.slice_range(self.total_items);
        if range.is_empty() {
            None
        } else {
            Some((range.start + 1, range.end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(total: usize) -> Paginator {
        let mut p = Paginator::new(
            ProcessingMode::ClientComputed,
            true,
            10,
            DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        );
        p.set_total_items(total);
        p
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let p = Paginator::new(ProcessingMode::Delegated, true, 0, vec![]);
        assert_eq!(p.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_slice_range_clamps_to_len() {
        let mut p = paginator(12);
        p.set_page_index(1);
        assert_eq!(p.slice_range(12), 10..12);
        assert_eq!(p.slice_range(5), 5..5);
    }

    #[test]
    fn test_display_range() {
        let mut p = paginator(12);
        assert_eq!(p.display_range(), Some((1, 10)));
        p.next_page();
        assert_eq!(p.display_range(), Some((11, 12)));
        assert_eq!(paginator(0).display_range(), None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut p = paginator(45);
        p.last_page();
        assert_eq!(p.page_index(), 4);
        p.set_total_items(15);
        assert!(p.clamp_page_index());
        assert_eq!(p.page_index(), 1);
        p.set_total_items(0);
        assert!(p.clamp_page_index());
        assert_eq!(p.page_index(), 0);
        assert!(!p.clamp_page_index());
    }

    #[test]
    fn test_page_count_override() {
        let mut p = paginator(12);
        p.set_page_count_override(Some(7));
        assert_eq!(p.page_count(), 7);
        assert_eq!(
            p.set_page_index(100),
            vec![TableEvent::PageChanged { page_index: 6 }]
        );
    }
}
