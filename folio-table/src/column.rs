//! Column definitions and value extraction.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};

use crate::error::TableError;
use crate::value::CellValue;

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Column configuration.
///
/// A column knows how to pull one logical field out of a row and whether
/// header clicks may sort by it. Columns are sortable unless opted out.
///
/// # Examples
///
/// ```
/// use folio_table::{CellValue, Column};
///
/// struct Order { id: String, price: f64 }
///
/// let id = Column::new("id", "Order ID", |o: &Order| CellValue::from(o.id.as_str()))
///     .sortable(false);
/// let price = Column::new("price", "Price", |o: &Order| CellValue::from(o.price));
///
/// assert!(!id.is_sortable());
/// assert!(price.is_sortable());
/// ```
pub struct Column<R> {
    id: String,
    header: String,
    accessor: Accessor<R>,
    sortable: bool,
}

impl<R> Column<R> {
    /// Create a new sortable column.
    ///
    /// The accessor must be a pure function of the row.
    pub fn new<F>(id: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            sortable: true,
        }
    }

    /// Create a column whose accessor may fail.
    ///
    /// An `Err` resolves to [`CellValue::Missing`] for that cell only.
    pub fn fallible<F, E>(id: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        R: 'static,
        F: Fn(&R) -> Result<CellValue, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let id = id.into();
        let column_id = id.clone();
        Self::new(id, header, move |row: &R| match accessor(row) {
            Ok(value) => value,
            Err(e) => {
                debug!("column '{}' accessor failed: {}", column_id, e);
                CellValue::Missing
            }
        })
    }

    /// Set whether header clicks may sort by this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Column id, unique within one table.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header text.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Whether this column accepts sort toggles.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Extract this column's value from a row.
    ///
    /// A panicking accessor does not take the table down: the panic is
    /// caught, logged, and the cell resolves to [`CellValue::Missing`].
    pub fn resolve(&self, row: &R) -> CellValue {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.accessor)(row))) {
            Ok(value) => value,
            Err(payload) => {
                warn!(
                    "column '{}' accessor panicked: {}",
                    self.id,
                    panic_message(payload.as_ref())
                );
                CellValue::Missing
            }
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Extract a human-readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// The validated column set of one table.
///
/// Guarantees every id is non-empty and unique.
pub struct Columns<R> {
    columns: Vec<Column<R>>,
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<R> Columns<R> {
    /// Validate and wrap a list of columns.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if column.id.is_empty() {
                return Err(TableError::EmptyColumnId { position });
            }
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn {
                    id: column.id.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Look up a column by id.
    pub fn get(&self, id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Position of a column by id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Iterate columns in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolve every column for a row, in display order.
    pub fn resolve_row(&self, row: &R) -> Vec<CellValue> {
        self.columns.iter().map(|c| c.resolve(row)).collect()
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
