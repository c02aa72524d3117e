//! # TodoMPA Testing
//!
//! Testing utilities and helpers for the to-do state machine.
//!
//! This crate provides:
//! - A deterministic [`FixedClock`] and a matching [`test_environment`]
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Fixtures that build the three default todos used across scenarios
//! - proptest strategies producing arbitrary sequences of user operations
//!
//! ## Example
//!
//! ```
//! use todomvc_testing::fixtures;
//!
//! let (state, ids) = fixtures::state_with_default_todos();
//! assert_eq!(state.count(), 3);
//! assert_eq!(state.store.get(ids[1]).unwrap().title, fixtures::TODO_ITEM_TWO);
//! ```

use chrono::{DateTime, Utc};
use todomvc_core::environment::Clock;

pub mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::Arc;
    use todomvc_core::TodoEnvironment;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todomvc_testing::mocks::FixedClock;
    /// use todomvc_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Reducer environment backed by [`test_clock`]
    #[must_use]
    pub fn test_environment() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()))
    }
}

/// Scenario fixtures
///
/// The three default titles match the ones every acceptance scenario starts
/// from.
pub mod fixtures {
    use super::mocks::test_environment;
    use todomvc_core::reducer::Reducer;
    use todomvc_core::{TodoAction, TodoEnvironment, TodoId, TodoReducer, TodoState};

    /// First default todo
    pub const TODO_ITEM_ONE: &str = "buy some cheese";
    /// Second default todo
    pub const TODO_ITEM_TWO: &str = "feed the cat";
    /// Third default todo
    pub const TODO_ITEM_THREE: &str = "book a doctors appointment";

    /// Submits `text` as a new todo and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `text` is blank, since no item is created then.
    #[allow(clippy::expect_used)]
    pub fn create_todo(state: &mut TodoState, env: &TodoEnvironment, text: &str) -> TodoId {
        let before = state.store.len();
        TodoReducer::new().reduce(
            state,
            TodoAction::AddTodo {
                text: text.to_string(),
            },
            env,
        );
        assert_eq!(state.store.len(), before + 1, "todo {text:?} was not created");
        state
            .store
            .items()
            .last()
            .map(|item| item.id)
            .expect("list cannot be empty after a successful add")
    }

    /// Submits the three default todos in order
    pub fn create_default_todos(state: &mut TodoState, env: &TodoEnvironment) -> [TodoId; 3] {
        [TODO_ITEM_ONE, TODO_ITEM_TWO, TODO_ITEM_THREE].map(|text| create_todo(state, env, text))
    }

    /// Fresh session containing the three default todos
    #[must_use]
    pub fn state_with_default_todos() -> (TodoState, [TodoId; 3]) {
        let mut state = TodoState::new();
        let ids = create_default_todos(&mut state, &test_environment());
        (state, ids)
    }

    /// Titles of the visible items, in order
    #[must_use]
    pub fn visible_titles(state: &TodoState) -> Vec<String> {
        state
            .visible_items()
            .into_iter()
            .map(|item| item.title.clone())
            .collect()
    }
}

/// Property-based testing utilities
///
/// Operations refer to items by position rather than id, so a generated
/// sequence stays meaningful whatever the list looks like when it runs.
pub mod properties {
    use proptest::prelude::*;
    use todomvc_core::reducer::Reducer;
    use todomvc_core::{Filter, TodoAction, TodoEnvironment, TodoReducer, TodoState};

    /// A user operation against whatever item sits at `index` (modulo length)
    #[derive(Clone, Debug)]
    pub enum Op {
        /// Submit new text
        Add(String),
        /// Commit an edit
        Edit(usize, String),
        /// Toggle one item
        Toggle(usize),
        /// Delete one item
        Delete(usize),
        /// Set every item
        ToggleAll(bool),
        /// Remove completed items
        ClearCompleted,
        /// Choose a filter
        SelectFilter(Filter),
        /// Browser back
        Back,
        /// Browser forward
        Forward,
    }

    /// Text that is sometimes blank, sometimes padded
    pub fn arb_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            " {1,4}",
            "[a-z]{1,8}( [a-z]{1,8}){0,2}",
            " {0,3}[a-z]{1,8} {0,3}",
        ]
    }

    /// Any filter
    pub fn arb_filter() -> impl Strategy<Value = Filter> {
        prop_oneof![
            Just(Filter::All),
            Just(Filter::Active),
            Just(Filter::Completed),
        ]
    }

    /// Any single operation
    pub fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => arb_text().prop_map(Op::Add),
            1 => (any::<usize>(), arb_text()).prop_map(|(i, t)| Op::Edit(i, t)),
            2 => any::<usize>().prop_map(Op::Toggle),
            1 => any::<usize>().prop_map(Op::Delete),
            1 => any::<bool>().prop_map(Op::ToggleAll),
            1 => Just(Op::ClearCompleted),
            1 => arb_filter().prop_map(Op::SelectFilter),
            1 => Just(Op::Back),
            1 => Just(Op::Forward),
        ]
    }

    /// Sequences of up to `max` operations
    pub fn arb_ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec(arb_op(), 0..=max)
    }

    /// Resolves `op` against the current list and applies it.
    ///
    /// Item operations on an empty list are skipped.
    pub fn apply_op(state: &mut TodoState, env: &TodoEnvironment, op: Op) {
        let pick = |state: &TodoState, index: usize| {
            let items = state.store.items();
            (!items.is_empty()).then(|| items[index % items.len()].id)
        };

        let action = match op {
            Op::Add(text) => Some(TodoAction::AddTodo { text }),
            Op::Edit(index, text) => {
                pick(state, index).map(|id| TodoAction::CommitEdit { id, text })
            }
            Op::Toggle(index) => pick(state, index).map(|id| TodoAction::ToggleTodo { id }),
            Op::Delete(index) => pick(state, index).map(|id| TodoAction::DeleteTodo { id }),
            Op::ToggleAll(completed) => Some(TodoAction::ToggleAll { completed }),
            Op::ClearCompleted => Some(TodoAction::ClearCompleted),
            Op::SelectFilter(filter) => Some(TodoAction::SelectFilter { filter }),
            Op::Back => Some(TodoAction::NavigateBack),
            Op::Forward => Some(TodoAction::NavigateForward),
        };

        if let Some(action) = action {
            TodoReducer::new().reduce(state, action, env);
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, test_environment, FixedClock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn default_todos_are_in_order() {
        let (state, _) = fixtures::state_with_default_todos();
        assert_eq!(
            fixtures::visible_titles(&state),
            [
                fixtures::TODO_ITEM_ONE,
                fixtures::TODO_ITEM_TWO,
                fixtures::TODO_ITEM_THREE
            ]
        );
    }

    #[test]
    fn default_todos_use_fixed_clock() {
        let (state, _) = fixtures::state_with_default_todos();
        assert!(state
            .store
            .items()
            .iter()
            .all(|item| item.created_at == test_clock().now()));
    }

    #[test]
    #[should_panic(expected = "was not created")]
    fn create_todo_rejects_blank_text() {
        let mut state = todomvc_core::TodoState::new();
        fixtures::create_todo(&mut state, &test_environment(), "   ");
    }
}
