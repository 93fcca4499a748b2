//! Table engine: derives the displayed page from rows, columns and state.

use log::{debug, warn};
use serde::Deserialize;
use serde::Serialize;

use crate::column::Columns;
use crate::event::{EventResult, TableEvent};
use crate::mode::ProcessingMode;
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, PaginationState, Paginator};
use crate::sort::{SortDescriptor, SortDirection, Sorter, sort_indices};
use crate::value::CellValue;

// =============================================================================
// Configuration
// =============================================================================

/// Static configuration of one table.
///
/// Every field has a default so partial configuration files deserialize.
/// Both concerns default to [`ProcessingMode::Delegated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Initial rows per page.
    pub page_size: usize,
    /// Page sizes offered to the user. Informational only.
    pub page_size_options: Vec<usize>,
    /// Who sorts the rows.
    pub sorting: ProcessingMode,
    /// Who slices the rows into pages.
    pub pagination: ProcessingMode,
    /// Whether header toggles sort at all.
    pub enable_sorting: bool,
    /// Whether the table is paginated at all.
    pub enable_pagination: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            sorting: ProcessingMode::Delegated,
            pagination: ProcessingMode::Delegated,
            enable_sorting: true,
            enable_pagination: true,
        }
    }
}

impl TableOptions {
    /// Set the initial page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the offered page sizes.
    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Set the sorting mode.
    pub fn sorting(mut self, mode: ProcessingMode) -> Self {
        self.sorting = mode;
        self
    }

    /// Set the pagination mode.
    pub fn pagination(mut self, mode: ProcessingMode) -> Self {
        self.pagination = mode;
        self
    }

    /// Enable or disable sorting.
    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Enable or disable pagination.
    pub fn enable_pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }
}

/// Values the owning screen supplies on every render.
///
/// `None` means "not supplied": the engine keeps its own value. In delegated
/// pagination `total_items` should always be supplied, since the row count is
/// only one page worth of data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderInput {
    /// Data is in flight; render a loading placeholder.
    pub loading: bool,
    /// Total item count across all pages.
    pub total_items: Option<usize>,
    /// Authoritative current page index.
    pub current_page: Option<usize>,
    /// Explicit page count, overriding `ceil(total_items / page_size)`.
    pub page_count: Option<usize>,
    /// Authoritative page size.
    pub page_size: Option<usize>,
    /// Authoritative sort.
    pub sort: Option<SortDescriptor>,
}

impl RenderInput {
    /// Nothing supplied; the engine owns all state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn total_items(mut self, total_items: usize) -> Self {
        self.total_items = Some(total_items);
        self
    }

    pub fn current_page(mut self, page_index: usize) -> Self {
        self.current_page = Some(page_index);
        self
    }

    pub fn page_count(mut self, page_count: usize) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort(mut self, sort: SortDescriptor) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Serializable snapshot of a table's transient state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableState {
    pub sort: SortDescriptor,
    pub pagination: PaginationState,
}

// =============================================================================
// Render output
// =============================================================================

/// The rows to display for the current page.
#[derive(Debug)]
pub enum DisplayedRows<'a, R> {
    /// A contiguous sub-slice of the input, in input order.
    PassThrough(&'a [R]),
    /// Rows reordered by a client-side sort.
    Derived(Vec<&'a R>),
}

impl<'a, R> DisplayedRows<'a, R> {
    /// Number of displayed rows.
    pub fn len(&self) -> usize {
        match self {
            Self::PassThrough(rows) => rows.len(),
            Self::Derived(rows) => rows.len(),
        }
    }

    /// Returns `true` if no rows are displayed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row at a display position.
    pub fn get(&self, index: usize) -> Option<&'a R> {
        match self {
            Self::PassThrough(rows) => {
                let rows: &'a [R] = rows;
                rows.get(index)
            }
            Self::Derived(rows) => rows.get(index).copied(),
        }
    }

    /// Iterate rows in display order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a R> + '_> {
        match self {
            Self::PassThrough(rows) => {
                let rows: &'a [R] = rows;
                Box::new(rows.iter())
            }
            Self::Derived(rows) => Box::new(rows.iter().copied()),
        }
    }

    /// The borrowed input slice when no reordering happened.
    pub fn as_slice(&self) -> Option<&'a [R]> {
        match self {
            Self::PassThrough(rows) => Some(*rows),
            Self::Derived(_) => None,
        }
    }

    /// Returns `true` if these rows are a slice of the input, in input order.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough(_))
    }
}

/// A derived page ready for the view layer.
#[derive(Debug)]
pub struct TablePage<'a, R> {
    rows: DisplayedRows<'a, R>,
    page_index: usize,
    page_size: usize,
    page_count: usize,
    total_items: usize,
    can_previous: bool,
    can_next: bool,
    display_range: Option<(usize, usize)>,
    sort: SortDescriptor,
}

impl<'a, R> TablePage<'a, R> {
    /// Rows to display, in order.
    pub fn rows(&self) -> &DisplayedRows<'a, R> {
        &self.rows
    }

    /// Consume the page, keeping only its rows.
    pub fn into_rows(self) -> DisplayedRows<'a, R> {
        self.rows
    }

    /// Zero-based current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn can_previous_page(&self) -> bool {
        self.can_previous
    }

    pub fn can_next_page(&self) -> bool {
        self.can_next
    }

    /// One-based `(first, last)` item numbers of this page.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        self.display_range
    }

    /// Sort in effect for this page.
    pub fn sort(&self) -> &SortDescriptor {
        &self.sort
    }
}

/// Result of a render.
///
/// Loading and empty inputs short-circuit to placeholders without running
/// derivation, so a table never flashes "page 1 of 0" while data is in
/// flight.
#[derive(Debug)]
pub enum TableView<'a, R> {
    /// Data is in flight.
    Loading,
    /// No rows to show.
    Empty,
    /// A derived page.
    Ready(TablePage<'a, R>),
}

impl<'a, R> TableView<'a, R> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The derived page, if any.
    pub fn page(&self) -> Option<&TablePage<'a, R>> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// Sort arrow shown in a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    /// Sortable but not the active sort column.
    Unsorted,
}

impl SortIndicator {
    /// Arrow glyph for the header.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
            Self::Unsorted => "↕",
        }
    }
}

impl From<SortDirection> for SortIndicator {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Ascending,
            SortDirection::Desc => Self::Descending,
        }
    }
}

/// Header state of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub id: &'a str,
    pub header: &'a str,
    /// `None` for columns that cannot be sorted (or when sorting is off).
    pub indicator: Option<SortIndicator>,
}

// =============================================================================
// Engine
// =============================================================================

/// One table instance: columns, sort state, pagination state and the queue
/// of outbound events.
///
/// Rows are not owned. Each render borrows the caller's rows and never
/// mutates or reorders them in place.
#[derive(Debug)]
pub struct TableEngine<R> {
    columns: Columns<R>,
    options: TableOptions,
    sorter: Sorter,
    paginator: Paginator,
    events: Vec<TableEvent>,
}

impl<R> TableEngine<R> {
    /// Create an unsorted table on its first page.
    pub fn new(columns: Columns<R>, options: TableOptions) -> Self {
        let sorter = Sorter::new(options.sorting, options.enable_sorting);
        let paginator = Paginator::new(
            options.pagination,
            options.enable_pagination,
            options.page_size,
            options.page_size_options.clone(),
        );

        Self {
            columns,
            options,
            sorter,
            paginator,
            events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Current sort.
    pub fn sort(&self) -> &SortDescriptor {
        self.sorter.descriptor()
    }

    /// Pagination state and page math.
    pub fn pagination(&self) -> &Paginator {
        &self.paginator
    }

    /// Snapshot of the transient state.
    pub fn snapshot(&self) -> TableState {
        TableState {
            sort: self.sorter.descriptor().clone(),
            pagination: self.paginator.state(),
        }
    }

    /// Restore a snapshot, e.g. persisted preferences. Produces no events.
    pub fn restore(&mut self, state: TableState) {
        self.sorter.set_descriptor(state.sort);
        self.paginator.sync(
            Some(state.pagination.page_index),
            Some(state.pagination.page_size),
        );
    }

    /// Header state for every column, in display order.
    pub fn headers(&self) -> Vec<HeaderCell<'_>> {
        let descriptor = self.sorter.descriptor();
        self.columns
            .iter()
            .map(|column| {
                let indicator = (self.sorter.is_enabled() && column.is_sortable()).then(|| {
                    descriptor
                        .direction_for(column.id())
                        .map_or(SortIndicator::Unsorted, SortIndicator::from)
                });
                HeaderCell {
                    id: column.id(),
                    header: column.header(),
                    indicator,
                }
            })
            .collect()
    }

    /// Cell values of a row, in column order.
    pub fn resolve_row(&self, row: &R) -> Vec<CellValue> {
        self.columns.resolve_row(row)
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Toggle the sort on a column (a header click).
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, column_id: &str) -> EventResult {
        let Some(column) = self.columns.get(column_id) else {
            warn!("Sort toggle on unknown column '{}'", column_id);
            return EventResult::Ignored;
        };
        let event = self.sorter.toggle(column);
        self.push(event)
    }

    /// Return to unsorted.
    pub fn clear_sort(&mut self) -> EventResult {
        let event = self.sorter.clear();
        self.push(event)
    }

    /// Move to a page (clamped).
    pub fn set_page_index(&mut self, page_index: usize) -> EventResult {
        let events = self.paginator.set_page_index(page_index);
        self.push(events)
    }

    /// Change the page size; always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> EventResult {
        let events = self.paginator.set_page_size(page_size);
        self.push(events)
    }

    pub fn next_page(&mut self) -> EventResult {
        let events = self.paginator.next_page();
        self.push(events)
    }

    pub fn previous_page(&mut self) -> EventResult {
        let events = self.paginator.previous_page();
        self.push(events)
    }

    pub fn first_page(&mut self) -> EventResult {
        let events = self.paginator.first_page();
        self.push(events)
    }

    pub fn last_page(&mut self) -> EventResult {
        let events = self.paginator.last_page();
        self.push(events)
    }

    /// Update the total item count between renders, so navigation is
    /// available before the next render (delegated pagination).
    pub fn set_total_items(&mut self, total_items: usize) {
        self.paginator.set_total_items(total_items);
    }

    /// Events pushed since the last drain.
    pub fn pending_events(&self) -> &[TableEvent] {
        &self.events
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, events: impl IntoIterator<Item = TableEvent>) -> EventResult {
        let before = self.events.len();
        self.events.extend(events);
        if self.events.len() > before {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Reconcile with the owner's values, then derive the displayed page.
    pub fn render<'a>(&mut self, rows: &'a [R], input: &RenderInput) -> TableView<'a, R> {
        self.adopt(input);

        // Rows in flight say nothing about the count; page and total stay put.
        if input.loading {
            return TableView::Loading;
        }
        self.count(rows, input);

        if rows.is_empty() {
            return TableView::Empty;
        }

        let displayed = self.derive(rows);
        TableView::Ready(TablePage {
            rows: displayed,
            page_index: self.paginator.page_index(),
            page_size: self.paginator.page_size(),
            page_count: self.paginator.page_count(),
            total_items: self.paginator.total_items(),
            can_previous: self.paginator.can_previous_page(),
            can_next: self.paginator.can_next_page(),
            display_range: self.paginator.display_range(),
            sort: self.sorter.descriptor().clone(),
        })
    }

    /// Take over the values the owner supplied explicitly.
    fn adopt(&mut self, input: &RenderInput) {
        if let Some(sort) = &input.sort {
            self.sorter.set_descriptor(sort.clone());
        }
        self.paginator.sync(input.current_page, input.page_size);
        self.paginator.set_page_count_override(input.page_count);
    }

    /// Update the item count from this render's rows and clamp the page.
    fn count(&mut self, rows: &[R], input: &RenderInput) {
        let delegated = self.paginator.is_enabled() && self.paginator.mode().is_delegated();
        if delegated {
            let total = match input.total_items {
                Some(total) => total,
                None => {
                    // Only a lower bound: everything before this page plus this page.
                    let bound = self
                        .paginator
                        .page_index()
                        .saturating_mul(self.paginator.page_size())
                        .saturating_add(rows.len());
                    warn!(
                        "Delegated pagination rendered without total_items, assuming at least {}",
                        bound
                    );
                    bound
                }
            };
            self.paginator.set_total_items(total);
        } else {
            self.paginator.set_total_items(rows.len());
            self.paginator.clamp_page_index();
        }
    }

    fn derive<'a>(&self, rows: &'a [R]) -> DisplayedRows<'a, R> {
        let slices = self.paginator.is_enabled() && self.paginator.mode().is_client_computed();

        let sort_key = if self.sorter.sorts_client_side() {
            let descriptor = self.sorter.descriptor();
            let column = descriptor.column_id().and_then(|id| self.columns.get(id));
            match (column, descriptor.direction()) {
                (Some(column), Some(direction)) => Some((column, direction)),
                _ => {
                    warn!(
                        "Sort references unknown column {:?}, leaving rows unsorted",
                        descriptor
                    );
                    None
                }
            }
        } else {
            None
        };

        match sort_key {
            None if slices => {
                DisplayedRows::PassThrough(&rows[self.paginator.slice_range(rows.len())])
            }
            None => DisplayedRows::PassThrough(rows),
            Some((column, direction)) => {
                let order = sort_indices(rows, column, direction);
                let range = if slices {
                    self.paginator.slice_range(order.len())
                } else {
                    0..order.len()
                };
                debug!(
                    "Sorted {} rows by '{}' {}, showing {:?}",
                    rows.len(),
                    column.id(),
                    direction.as_str(),
                    range
                );
                DisplayedRows::Derived(order[range].iter().map(|&i| &rows[i]).collect())
            }
        }
    }
}
