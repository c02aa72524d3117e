//! # TodoMPA Core
//!
//! The to-do list state machine and its filter routing, with no UI attached.
//!
//! ## Core Concepts
//!
//! - **[`TodoStore`]**: the ordered item list and every mutation on it
//! - **[`ViewRouter`]**: the current [`Filter`] and its back/forward history
//! - **[`TodoAction`]**: one variant per input event (submit, toggle, edit, ...)
//! - **[`TodoReducer`]**: applies an action to a [`TodoState`] and returns
//!   [`Effect`]s telling observers what changed
//!
//! The presentation layer is a thin adapter: it turns input events into
//! actions and renders [`TodoState::view`]. Nothing here performs I/O.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use todomvc_core::environment::SystemClock;
//! use todomvc_core::reducer::Reducer;
//! use todomvc_core::{Filter, TodoAction, TodoEnvironment, TodoReducer, TodoState};
//!
//! let env = TodoEnvironment::new(Arc::new(SystemClock));
//! let reducer = TodoReducer::new();
//! let mut state = TodoState::new();
//!
//! for text in ["buy some cheese", "feed the cat", "book a doctors appointment"] {
//!     reducer.reduce(&mut state, TodoAction::AddTodo { text: text.to_string() }, &env);
//! }
//! let cat = state.store.items()[1].id;
//! reducer.reduce(&mut state, TodoAction::ToggleTodo { id: cat }, &env);
//! reducer.reduce(&mut state, TodoAction::SelectFilter { filter: Filter::Active }, &env);
//!
//! assert_eq!(state.count(), 2);
//! assert!(!state.all_completed());
//! let visible: Vec<_> = state.visible_items().iter().map(|i| i.title.as_str()).collect();
//! assert_eq!(visible, ["buy some cheese", "book a doctors appointment"]);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

pub mod action;
pub mod effect;
pub mod error;
pub mod router;
pub mod session;
pub mod store;
pub mod types;

pub use action::TodoAction;
pub use effect::{Effect, Notification};
pub use error::TodoError;
pub use router::{ViewRouter, DEFAULT_HISTORY_LIMIT};
pub use session::{TodoEnvironment, TodoReducer, TodoState, TodoView};
pub use store::{EditBuffer, EditOutcome, TodoStore};
pub use types::{Filter, TodoId, TodoItem};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Must apply the action completely or not at all: a rejected action
        /// leaves `state` as it was (apart from error bookkeeping).
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Environment module - Dependency injection traits
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
