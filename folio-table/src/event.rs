//! Outbound table events.
//!
//! Every accepted interaction pushes one or more [`TableEvent`]s onto the
//! engine's queue. The owning screen drains the queue after the interaction
//! and reacts (re-fetch a page, persist a preference, ...). In client-computed
//! mode the events are informational since the engine already applied the
//! change; in delegated mode they are the request for the caller to act.

use serde::Deserialize;
use serde::Serialize;

use crate::sort::SortDirection;

/// A state change the owning screen may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    /// The current page index changed.
    PageChanged { page_index: usize },
    /// The page size changed. Always followed by `PageChanged { page_index: 0 }`.
    PageSizeChanged { page_size: usize },
    /// The sort column/direction changed. Both are `None` when the table
    /// returned to unsorted.
    SortChanged {
        column: Option<String>,
        direction: Option<SortDirection>,
    },
}

/// Result of handling an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The request was ignored: no state change, no event.
    Ignored,
    /// The request changed state and pushed events.
    Consumed,
}

impl EventResult {
    /// Check if the interaction was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
