//! Input events delivered to the to-do session.
//!
//! Every user interaction the presentation layer can observe maps to exactly
//! one [`TodoAction`]. The reducer applies them one at a time, in arrival
//! order.

use crate::types::{Filter, TodoId};
use serde::{Deserialize, Serialize};

/// Commands accepted by [`TodoReducer`](crate::TodoReducer)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TodoAction {
    // ========== New item input ==========
    /// The new-item input changed
    SetDraft {
        /// Current input text
        text: String,
    },

    /// Submit a new item
    AddTodo {
        /// Raw input text, trimmed before storing
        text: String,
    },

    // ========== Editing ==========
    /// Open the edit field for an item
    BeginEdit {
        /// Item to edit
        id: TodoId,
    },

    /// The edit field changed
    UpdateEdit {
        /// Item being edited
        id: TodoId,
        /// Current edit text
        text: String,
    },

    /// Save the edit (enter or blur); blank text removes the item
    CommitEdit {
        /// Item being edited
        id: TodoId,
        /// Raw edit text, trimmed before storing
        text: String,
    },

    /// Abandon the edit (escape)
    CancelEdit {
        /// Item being edited
        id: TodoId,
    },

    // ========== Item mutations ==========
    /// Flip an item's completion flag
    ToggleTodo {
        /// Item to toggle
        id: TodoId,
    },

    /// Remove an item
    DeleteTodo {
        /// Item to remove
        id: TodoId,
    },

    /// Set every item's completion flag
    ToggleAll {
        /// Value applied to every item
        completed: bool,
    },

    /// Click on the toggle-all checkbox: complete everything, or reactivate
    /// everything if it is all completed already
    CompleteAll,

    /// Remove every completed item
    ClearCompleted,

    // ========== Routing ==========
    /// Apply a filter and push it onto the history
    SelectFilter {
        /// Filter to apply
        filter: Filter,
    },

    /// Follow a filter link given as a name or route path
    Navigate {
        /// `"all"`, `"/active"`, ...
        path: String,
    },

    /// Browser back
    NavigateBack,

    /// Browser forward
    NavigateForward,

    // ========== Session ==========
    /// Drop all items and return to the default filter
    Reset,
}

impl TodoAction {
    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetDraft { .. } => "set_draft",
            Self::AddTodo { .. } => "add_todo",
            Self::BeginEdit { .. } => "begin_edit",
            Self::UpdateEdit { .. } => "update_edit",
            Self::CommitEdit { .. } => "commit_edit",
            Self::CancelEdit { .. } => "cancel_edit",
            Self::ToggleTodo { .. } => "toggle_todo",
            Self::DeleteTodo { .. } => "delete_todo",
            Self::ToggleAll { .. } => "toggle_all",
            Self::CompleteAll => "complete_all",
            Self::ClearCompleted => "clear_completed",
            Self::SelectFilter { .. } => "select_filter",
            Self::Navigate { .. } => "navigate",
            Self::NavigateBack => "navigate_back",
            Self::NavigateForward => "navigate_forward",
            Self::Reset => "reset",
        }
    }

    /// The item this action targets, if any
    #[must_use]
    pub const fn target(&self) -> Option<TodoId> {
        match self {
            Self::BeginEdit { id }
            | Self::UpdateEdit { id, .. }
            | Self::CommitEdit { id, .. }
            | Self::CancelEdit { id }
            | Self::ToggleTodo { id }
            | Self::DeleteTodo { id } => Some(*id),
            _ => None,
        }
    }
}
