//! Single-column sort state machine.
//!
//! A table is either unsorted or sorted by exactly one column in one
//! direction. Toggling a column cycles it through
//! `Unsorted -> Ascending -> Descending -> Unsorted`; toggling a different
//! column discards the previous column's direction and starts at ascending.

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::event::TableEvent;
use crate::mode::ProcessingMode;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Lowercase name, as used in notifications (`"asc"` / `"desc"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The current sort of a table.
///
/// There is no "column selected but no direction" state: a descriptor is
/// either unsorted or names a column together with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "column", rename_all = "snake_case")]
pub enum SortDescriptor {
    #[default]
    Unsorted,
    Ascending(String),
    Descending(String),
}

impl SortDescriptor {
    /// Builds a sorted descriptor for a column and direction.
    pub fn sorted(column: impl Into<String>, direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Ascending(column.into()),
            SortDirection::Desc => Self::Descending(column.into()),
        }
    }

    /// Normalises an externally supplied column/direction pair.
    ///
    /// Anything other than a column together with a direction collapses to
    /// [`SortDescriptor::Unsorted`].
    pub fn from_parts(column: Option<String>, direction: Option<SortDirection>) -> Self {
        match (column, direction) {
            (Some(column), Some(direction)) if !column.is_empty() => Self::sorted(column, direction),
            _ => Self::Unsorted,
        }
    }

    /// The sorted column, if any.
    pub fn column_id(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::Ascending(id) | Self::Descending(id) => Some(id),
        }
    }

    /// The sort direction, if any.
    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Ascending(_) => Some(SortDirection::Asc),
            Self::Descending(_) => Some(SortDirection::Desc),
        }
    }

    /// The direction this descriptor applies to the given column, if any.
    pub fn direction_for(&self, column_id: &str) -> Option<SortDirection> {
        match self.column_id() {
            Some(id) if id == column_id => self.direction(),
            _ => None,
        }
    }

    /// Returns `true` unless unsorted.
    pub fn is_sorted(&self) -> bool {
        !matches!(self, Self::Unsorted)
    }

    /// The state reached by toggling `column_id`.
    pub fn toggled(&self, column_id: &str) -> Self {
        match self {
            Self::Ascending(id) if id == column_id => Self::Descending(id.clone()),
            Self::Descending(id) if id == column_id => Self::Unsorted,
            _ => Self::Ascending(column_id.to_string()),
        }
    }

    /// Encodes the descriptor as a query parameter (`"price"`, `"-price"`).
    pub fn to_query(&self) -> Option<String> {
        match self {
            Self::Unsorted => None,
            Self::Ascending(id) => Some(id.clone()),
            Self::Descending(id) => Some(format!("-{}", id)),
        }
    }

    /// Parses a query parameter written by [`SortDescriptor::to_query`].
    ///
    /// A leading `-` means descending; an empty string means unsorted.
    pub fn parse_query(s: &str) -> Self {
        let s = s.trim();
        if let Some(field) = s.strip_prefix('-') {
            Self::from_parts(Some(field.to_string()), Some(SortDirection::Desc))
        } else {
            Self::from_parts(Some(s.to_string()), Some(SortDirection::Asc))
        }
    }

    fn to_event(&self) -> TableEvent {
        TableEvent::SortChanged {
            column: self.column_id().map(str::to_string),
            direction: self.direction(),
        }
    }
}

/// Sort state of one table.
///
/// The machine applies the same transition rule in both processing modes so
/// the header can always show which arrow is active. The mode only decides
/// whether the engine reorders rows itself.
#[derive(Debug, Clone)]
pub struct Sorter {
    mode: ProcessingMode,
    enabled: bool,
    descriptor: SortDescriptor,
}

impl Sorter {
    /// Create an unsorted sorter.
    pub fn new(mode: ProcessingMode, enabled: bool) -> Self {
        Self {
            mode,
            enabled,
            descriptor: SortDescriptor::Unsorted,
        }
    }

    /// Processing mode.
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Whether sorting is enabled for the table at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current descriptor.
    pub fn descriptor(&self) -> &SortDescriptor {
        &self.descriptor
    }

    /// Handle a sort toggle on a column.
    ///
    /// Returns the resulting `SortChanged` event, or `None` when the toggle is
    /// ignored (sorting disabled, or the column is not sortable).
    pub fn toggle<R>(&mut self, column: &Column<R>) -> Option<TableEvent> {
        if !self.enabled || !column.is_sortable() {
            debug!("Ignoring sort toggle on '{}'", column.id());
            return None;
        }

        self.descriptor = self.descriptor.toggled(column.id());
        debug!("Sort is now {:?} ({:?} mode)", self.descriptor, self.mode);
        Some(self.descriptor.to_event())
    }

    /// Overwrite the descriptor with an authoritative external value.
    ///
    /// No event is produced: the caller already knows.
    pub fn set_descriptor(&mut self, descriptor: SortDescriptor) {
        self.descriptor = descriptor;
    }

    /// Return to unsorted. Produces an event only if the table was sorted.
    pub fn clear(&mut self) -> Option<TableEvent> {
        if !self.descriptor.is_sorted() {
            return None;
        }
        self.descriptor = SortDescriptor::Unsorted;
        Some(self.descriptor.to_event())
    }

    /// Whether the engine must reorder rows itself on the next render.
    pub fn sorts_client_side(&self) -> bool {
        self.enabled && self.mode.is_client_computed() && self.descriptor.is_sorted()
    }
}

/// Stable sort of `rows` by a column, returned as a permutation of indices.
///
/// Each key is resolved once. Rows with equal keys keep their original
/// relative order in both directions, and `rows` itself is left untouched.
pub fn sort_indices<R>(rows: &[R], column: &Column<R>, direction: SortDirection) -> Vec<usize> {
    let mut keyed: Vec<(CellValue, usize)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (column.resolve(row), i))
        .collect();

    match direction {
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.sort_cmp(&b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| b.0.sort_cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_cycle() {
        let unsorted = SortDescriptor::Unsorted;
        let asc = unsorted.toggled("price");
        assert_eq!(asc, SortDescriptor::Ascending("price".into()));
        let desc = asc.toggled("price");
        assert_eq!(desc, SortDescriptor::Descending("price".into()));
        assert_eq!(desc.toggled("price"), SortDescriptor::Unsorted);
    }

    #[test]
    fn test_toggled_other_column_starts_ascending() {
        let desc = SortDescriptor::Descending("price".into());
        assert_eq!(
            desc.toggled("symbol"),
            SortDescriptor::Ascending("symbol".into())
        );
    }

    #[test]
    fn test_query_encoding() {
        let desc = SortDescriptor::Descending("price".into());
        assert_eq!(desc.to_query().as_deref(), Some("-price"));
        assert_eq!(SortDescriptor::parse_query("-price"), desc);
        assert_eq!(
            SortDescriptor::parse_query("symbol"),
            SortDescriptor::Ascending("symbol".into())
        );
        assert_eq!(SortDescriptor::parse_query(""), SortDescriptor::Unsorted);
        assert_eq!(SortDescriptor::parse_query("-"), SortDescriptor::Unsorted);
        assert_eq!(SortDescriptor::Unsorted.to_query(), None);
    }

    #[test]
    fn test_from_parts_normalises() {
        assert_eq!(
            SortDescriptor::from_parts(Some("price".into()), None),
            SortDescriptor::Unsorted
        );
        assert_eq!(
            SortDescriptor::from_parts(None, Some(SortDirection::Asc)),
            SortDescriptor::Unsorted
        );
    }
}
