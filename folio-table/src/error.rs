//! Error types

/// Errors raised while assembling a table.
///
/// Interactive operations (sort toggles, page navigation) never fail: bad
/// requests are clamped or ignored. Only structural mistakes made when the
/// table is built are reported here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A column was declared with an empty id.
    #[error("column at position {position} has an empty id")]
    EmptyColumnId { position: usize },

    /// Two columns share the same id.
    #[error("duplicate column id: {id}")]
    DuplicateColumn { id: String },
}
