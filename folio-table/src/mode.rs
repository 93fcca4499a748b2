//! Processing modes for sorting and pagination.

use serde::Deserialize;
use serde::Serialize;

/// Who derives the sort order or the page slice.
///
/// Sorting and pagination each carry their own mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// The engine sorts/slices the complete row set it is handed.
    ClientComputed,
    /// The caller already sorted/sliced the rows upstream; the engine passes
    /// them through untouched and only tracks state and emits events.
    #[default]
    Delegated,
}

impl ProcessingMode {
    /// Returns `true` for [`ProcessingMode::ClientComputed`].
    pub fn is_client_computed(&self) -> bool {
        matches!(self, ProcessingMode::ClientComputed)
    }

    /// Returns `true` for [`ProcessingMode::Delegated`].
    pub fn is_delegated(&self) -> bool {
        matches!(self, ProcessingMode::Delegated)
    }
}
