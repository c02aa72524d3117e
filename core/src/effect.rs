//! Effect descriptions returned by reducers.
//!
//! The to-do session has no background work. Effects only describe what an
//! observer needs to hear about: which parts of the rendered page changed, or
//! why an action was rejected. The runtime forwards them; it never executes
//! anything on their behalf.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable change produced by an action
///
/// Observers re-read derived state (visible items, counter, toggle-all
/// indicator, filter highlight) when they receive one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notification {
    /// An item was appended
    NewTodo,
    /// An item's title, completion flag or edit state changed
    UpdatedTodo,
    /// An item was removed
    DeletedTodo,
    /// Every item's completion flag was set at once
    CompletedAll,
    /// Completed items were removed
    ClearedCompleted,
    /// The current filter changed
    FilterChanged,
    /// The session was reset
    Reset,
}

impl Notification {
    /// Event name used in the `HX-Trigger` response header
    #[must_use]
    pub const fn trigger(self) -> &'static str {
        match self {
            Self::NewTodo => "newTodo",
            Self::UpdatedTodo => "updatedTodo",
            Self::DeletedTodo => "deletedTodo",
            Self::CompletedAll => "completedAll",
            Self::ClearedCompleted => "clearedCompleted",
            Self::FilterChanged => "filterChanged",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger())
    }
}

/// Effect type - describes what an action produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// No-op effect
    None,

    /// Tell observers that derived state changed
    Notify(Notification),

    /// The action failed; state was left untouched
    Rejected(TodoError),
}

impl Effect {
    /// The notification carried by this effect, if any
    #[must_use]
    pub const fn notification(&self) -> Option<Notification> {
        match self {
            Self::Notify(notification) => Some(*notification),
            _ => None,
        }
    }

    /// The error carried by this effect, if any
    #[must_use]
    pub const fn error(&self) -> Option<&TodoError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
