//! The ordered to-do list and every mutation on it.
//!
//! `TodoStore` owns the items, the new-item input buffer and the single
//! in-progress edit buffer. Titles are trimmed on every write; an empty
//! trimmed title never reaches the list.

use crate::error::{Result, TodoError};
use crate::types::{TodoId, TodoItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text being edited for one item, not yet committed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    /// Item being edited
    pub id: TodoId,
    /// Uncommitted text
    pub text: String,
}

/// Result of a successful [`TodoStore::edit`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The title was replaced
    Updated,
    /// The trimmed text was empty, so the item was removed
    Removed,
}

/// Ordered list of todo items
///
/// Insertion order is preserved. New items append to the end; editing and
/// toggling never reorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    next_id: u64,
    draft: String,
    editing: Option<EditBuffer>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// Creates an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            draft: String::new(),
            editing: None,
        }
    }

    // ========== Reads ==========

    /// All items in list order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Total number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of active (not completed) items, shown in the footer counter
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Whether the "clear completed" control should be shown
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|item| item.completed)
    }

    /// The toggle-all indicator: every item is completed and there is at
    /// least one item.
    ///
    /// Recomputed on every call; there is no stored flag to go stale.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.completed)
    }

    /// Current contents of the new-item input
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The in-progress edit, if any
    #[must_use]
    pub const fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    /// Returns `true` if `id` is currently being edited
    #[must_use]
    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing.as_ref().is_some_and(|buffer| buffer.id == id)
    }

    // ========== Mutations ==========

    /// Replaces the new-item input buffer
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Appends a new active item with the trimmed text.
    ///
    /// Empty or whitespace-only input is silently ignored and returns `None`.
    /// On success the input buffer is cleared.
    pub fn add(&mut self, raw: &str, now: DateTime<Utc>) -> Option<TodoId> {
        let title = raw.trim();
        if title.is_empty() {
            return None;
        }

        let id = TodoId::new(self.next_id);
        self.next_id += 1;
        self.items.push(TodoItem::new(id, title.to_string(), now));
        self.draft.clear();
        Some(id)
    }

    /// Replaces the title of `id` with the trimmed text, or removes the item
    /// when the trimmed text is empty.
    ///
    /// The completion flag is preserved. An open edit buffer for `id` is
    /// closed, since its text has now been committed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` does not exist.
    pub fn edit(&mut self, id: TodoId, raw: &str) -> Result<EditOutcome> {
        let index = self.position(id)?;
        self.close_edit(id);

        let title = raw.trim();
        if title.is_empty() {
            self.items.remove(index);
            return Ok(EditOutcome::Removed);
        }

        self.items[index].title = title.to_string();
        Ok(EditOutcome::Updated)
    }

    /// Opens the edit buffer for `id`, seeded with the stored title.
    ///
    /// Any other open edit is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` does not exist.
    pub fn begin_edit(&mut self, id: TodoId) -> Result<&EditBuffer> {
        let index = self.position(id)?;
        let text = self.items[index].title.clone();
        Ok(self.editing.insert(EditBuffer { id, text }))
    }

    /// Replaces the uncommitted text for `id`, opening the buffer if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` does not exist.
    pub fn update_edit(&mut self, id: TodoId, text: impl Into<String>) -> Result<()> {
        self.position(id)?;
        self.editing = Some(EditBuffer {
            id,
            text: text.into(),
        });
        Ok(())
    }

    /// Discards the uncommitted edit for `id`. The stored title is untouched.
    ///
    /// Returns `true` if a buffer was discarded.
    pub fn cancel_edit(&mut self, id: TodoId) -> bool {
        self.close_edit(id)
    }

    /// Flips the completion flag of `id` and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` does not exist.
    pub fn toggle(&mut self, id: TodoId, now: DateTime<Utc>) -> Result<bool> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        let completed = !item.completed;
        item.set_completed(completed, now);
        Ok(completed)
    }

    /// Removes `id` from the list and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` does not exist.
    pub fn delete(&mut self, id: TodoId) -> Result<TodoItem> {
        let index = self.position(id)?;
        self.close_edit(id);
        Ok(self.items.remove(index))
    }

    /// Sets every item's completion flag to `completed`.
    ///
    /// Idempotent. Returns how many items changed.
    pub fn toggle_all(&mut self, completed: bool, now: DateTime<Utc>) -> usize {
        self.items
            .iter_mut()
            .map(|item| item.set_completed(completed, now))
            .filter(|changed| *changed)
            .count()
    }

    /// Click semantics of the toggle-all checkbox: completes everything unless
    /// everything is already completed, in which case reactivates everything.
    ///
    /// Returns the value applied, or `None` for an empty list.
    pub fn complete_all(&mut self, now: DateTime<Utc>) -> Option<bool> {
        if self.items.is_empty() {
            return None;
        }
        let completed = !self.all_completed();
        self.toggle_all(completed, now);
        Some(completed)
    }

    /// Removes every completed item, keeping the relative order of the rest.
    ///
    /// Returns how many items were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(TodoItem::is_active);

        if let Some(buffer) = &self.editing {
            if !self.items.iter().any(|item| item.id == buffer.id) {
                self.editing = None;
            }
        }

        before - self.items.len()
    }

    /// Empties the list and both input buffers.
    ///
    /// The id counter keeps running so ids from before the reset are never
    /// handed out again.
    pub fn reset(&mut self) {
        self.items.clear();
        self.draft.clear();
        self.editing = None;
    }

    fn position(&self, id: TodoId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))
    }

    fn close_edit(&mut self, id: TodoId) -> bool {
        if self.is_editing(id) {
            self.editing = None;
            true
        } else {
            false
        }
    }
}
