//! Data source error types

/// Errors returned by a [`DataSource`](crate::source::DataSource).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The request named a column the source cannot sort by.
    #[error("Cannot sort by unknown column '{column}'")]
    UnknownSortColumn { column: String },

    /// The page size was zero.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// The backing store could not be reached.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}
