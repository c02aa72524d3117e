//! Session state and the reducer that drives it.
//!
//! One session owns one [`TodoStore`] and one [`ViewRouter`]. Each
//! [`TodoAction`] is applied to completion before the next; the returned
//! effects tell observers what to re-read.

use crate::action::TodoAction;
use crate::effect::{Effect, Notification};
use crate::environment::Clock;
use crate::error::{Result, TodoError};
use crate::reducer::Reducer;
use crate::router::ViewRouter;
use crate::store::{EditBuffer, EditOutcome, TodoStore};
use crate::types::{Filter, TodoItem};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

/// State of one to-do session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// The item list
    pub store: TodoStore,
    /// Filter selection and history
    pub router: ViewRouter,
    /// Error from the most recent action, cleared by the next accepted one
    pub last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates an empty session on the `All` filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session whose filter history keeps `limit` entries
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            store: TodoStore::new(),
            router: ViewRouter::with_limit(limit),
            last_error: None,
        }
    }

    /// Items visible under the current filter
    #[must_use]
    pub fn visible_items(&self) -> Vec<&TodoItem> {
        self.router.visible_items(&self.store)
    }

    /// Number of active items
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Derived toggle-all indicator
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.store.all_completed()
    }

    /// Filter rendered as selected
    #[must_use]
    pub fn highlighted_filter(&self) -> Filter {
        self.router.highlighted_filter()
    }

    /// Snapshot of everything the page renders
    #[must_use]
    pub fn view(&self) -> TodoView {
        let todos_left = self.store.count();
        TodoView {
            items: self.visible_items().into_iter().cloned().collect(),
            todos_left,
            counter_text: counter_text(todos_left),
            has_completed: self.store.has_completed(),
            all_completed: self.store.all_completed(),
            is_empty: self.store.is_empty(),
            filter: self.router.highlighted_filter(),
            editing: self.store.editing().cloned(),
            draft: self.store.draft().to_string(),
            can_go_back: self.router.can_go_back(),
            can_go_forward: self.router.can_go_forward(),
        }
    }
}

/// Footer counter text, e.g. `"1 item left"`
#[must_use]
pub fn counter_text(todos_left: usize) -> String {
    let noun = if todos_left == 1 { "item" } else { "items" };
    format!("{todos_left} {noun} left")
}

/// Serializable read model of a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    /// Items visible under the current filter, in list order
    pub items: Vec<TodoItem>,
    /// Number of active items across the whole list
    pub todos_left: usize,
    /// Footer counter text
    pub counter_text: String,
    /// Whether the "Clear completed" button is shown
    pub has_completed: bool,
    /// Toggle-all checkbox state
    pub all_completed: bool,
    /// Whether the list has no items (main section and footer hidden)
    pub is_empty: bool,
    /// Highlighted filter
    pub filter: Filter,
    /// Open edit buffer
    pub editing: Option<EditBuffer>,
    /// New-item input contents
    pub draft: String,
    /// Whether back navigation is possible
    pub can_go_back: bool,
    /// Whether forward navigation is possible
    pub can_go_forward: bool,
}

/// Environment dependencies for the Todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the to-do session
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an action and reports which notification, if any, it produced
    fn apply(
        state: &mut TodoState,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<Option<Notification>> {
        let store = &mut state.store;
        let router = &mut state.router;

        let notification = match action {
            TodoAction::SetDraft { text } => {
                store.set_draft(text);
                None
            }
            TodoAction::AddTodo { text } => store
                .add(&text, env.clock.now())
                .map(|_| Notification::NewTodo),
            TodoAction::BeginEdit { id } => {
                store.begin_edit(id)?;
                Some(Notification::UpdatedTodo)
            }
            TodoAction::UpdateEdit { id, text } => {
                store.update_edit(id, text)?;
                None
            }
            TodoAction::CommitEdit { id, text } => match store.edit(id, &text)? {
                EditOutcome::Updated => Some(Notification::UpdatedTodo),
                EditOutcome::Removed => Some(Notification::DeletedTodo),
            },
            TodoAction::CancelEdit { id } => store
                .cancel_edit(id)
                .then_some(Notification::UpdatedTodo),
            TodoAction::ToggleTodo { id } => {
                store.toggle(id, env.clock.now())?;
                Some(Notification::UpdatedTodo)
            }
            TodoAction::DeleteTodo { id } => {
                store.delete(id)?;
                Some(Notification::DeletedTodo)
            }
            TodoAction::ToggleAll { completed } => {
                let changed = store.toggle_all(completed, env.clock.now());
                (changed > 0).then_some(Notification::CompletedAll)
            }
            TodoAction::CompleteAll => store
                .complete_all(env.clock.now())
                .map(|_| Notification::CompletedAll),
            TodoAction::ClearCompleted => {
                let removed = store.clear_completed();
                (removed > 0).then_some(Notification::ClearedCompleted)
            }
            TodoAction::SelectFilter { filter } => {
                router.set_filter(filter);
                Some(Notification::FilterChanged)
            }
            TodoAction::Navigate { path } => {
                router.navigate(&path)?;
                Some(Notification::FilterChanged)
            }
            TodoAction::NavigateBack => router.go_back().then_some(Notification::FilterChanged),
            TodoAction::NavigateForward => {
                router.go_forward().then_some(Notification::FilterChanged)
            }
            TodoAction::Reset => {
                store.reset();
                router.reset();
                Some(Notification::Reset)
            }
        };

        Ok(notification)
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        let name = action.name();
        let target = action.target();

        match Self::apply(state, action, env) {
            Ok(notification) => {
                state.last_error = None;
                tracing::trace!(action = name, ?notification, "Action applied");
                notification.map_or_else(|| smallvec![Effect::None], |n| smallvec![Effect::Notify(n)])
            }
            Err(error) => {
                tracing::debug!(action = name, ?target, %error, "Action rejected");
                state.last_error = Some(error.clone());
                smallvec![Effect::Rejected(error)]
            }
        }
    }
}
