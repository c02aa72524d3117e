//! Property tests for the store and router invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use todomvc_core::reducer::Reducer;
use todomvc_core::{Filter, TodoAction, TodoId, TodoReducer, TodoState, ViewRouter};
use todomvc_testing::properties::{apply_op, arb_ops, arb_text};
use todomvc_testing::test_environment;

fn send(state: &mut TodoState, action: TodoAction) {
    TodoReducer::new().reduce(state, action, &test_environment());
}

/// Session built from an arbitrary history of user operations
fn arb_state() -> impl Strategy<Value = TodoState> {
    arb_ops(40).prop_map(|ops| {
        let env = test_environment();
        let mut state = TodoState::new();
        for op in ops {
            apply_op(&mut state, &env, op);
        }
        state
    })
}

fn ids(items: &[&todomvc_core::TodoItem]) -> HashSet<TodoId> {
    items.iter().map(|item| item.id).collect()
}

proptest! {
    /// Non-blank adds append in call order, blank ones are ignored.
    #[test]
    fn adds_append_in_order(texts in prop::collection::vec(arb_text(), 0..20)) {
        let mut state = TodoState::new();
        for text in &texts {
            send(&mut state, TodoAction::AddTodo { text: text.clone() });
        }

        let expected: Vec<&str> = texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        let titles: Vec<&str> = state.store.items().iter().map(|i| i.title.as_str()).collect();
        prop_assert_eq!(titles, expected);
    }

    /// Blank input never changes the list.
    #[test]
    fn blank_adds_are_ignored(state in arb_state(), spaces in " {0,6}") {
        let mut state = state;
        let before = state.store.clone();
        send(&mut state, TodoAction::AddTodo { text: spaces });
        prop_assert_eq!(state.store.items(), before.items());
    }

    /// A blank edit removes exactly its target and keeps everyone else in order.
    #[test]
    fn blank_edit_removes_only_target(state in arb_state(), index in any::<usize>()) {
        prop_assume!(!state.store.is_empty());
        let mut state = state;
        let before: Vec<TodoId> = state.store.items().iter().map(|i| i.id).collect();
        let target = before[index % before.len()];

        send(&mut state, TodoAction::CommitEdit { id: target, text: String::new() });

        let after: Vec<TodoId> = state.store.items().iter().map(|i| i.id).collect();
        let expected: Vec<TodoId> = before.into_iter().filter(|id| *id != target).collect();
        prop_assert_eq!(after, expected);
    }

    /// Completing everything zeroes the counter, reactivating restores it.
    #[test]
    fn toggle_all_drives_count(state in arb_state()) {
        prop_assume!(!state.store.is_empty());
        let mut state = state;
        let len = state.store.len();

        send(&mut state, TodoAction::ToggleAll { completed: true });
        prop_assert_eq!(state.count(), 0);
        prop_assert!(state.all_completed());

        send(&mut state, TodoAction::ToggleAll { completed: false });
        prop_assert_eq!(state.count(), len);
    }

    /// The indicator is true exactly when the list is non-empty and fully completed.
    #[test]
    fn indicator_is_derived(state in arb_state(), index in any::<usize>()) {
        let items = state.store.items();
        let expected = !items.is_empty() && items.iter().all(|i| i.completed);
        prop_assert_eq!(state.all_completed(), expected);

        if expected {
            let mut state = state.clone();
            let id = state.store.items()[index % state.store.len()].id;
            send(&mut state, TodoAction::ToggleTodo { id });
            prop_assert!(!state.all_completed());
        }
    }

    /// A second clear in a row changes nothing.
    #[test]
    fn clear_completed_is_idempotent(state in arb_state()) {
        let mut state = state;
        send(&mut state, TodoAction::ClearCompleted);
        let once = state.store.clone();
        send(&mut state, TodoAction::ClearCompleted);
        prop_assert_eq!(state.store, once);
    }

    /// Active and Completed partition the list.
    #[test]
    fn filters_partition_items(state in arb_state()) {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);
        let active = ids(&router.visible_items(&state.store));
        router.set_filter(Filter::Completed);
        let completed = ids(&router.visible_items(&state.store));
        let all: HashSet<TodoId> = state.store.items().iter().map(|i| i.id).collect();

        prop_assert!(active.is_disjoint(&completed));
        prop_assert_eq!(&active | &completed, all);
    }

    /// Back retraces the selections in reverse, whatever the list holds.
    #[test]
    fn back_retraces_selections(state in arb_state()) {
        let mut state = state;
        send(&mut state, TodoAction::Reset);
        send(&mut state, TodoAction::SelectFilter { filter: Filter::Active });
        send(&mut state, TodoAction::SelectFilter { filter: Filter::Completed });

        send(&mut state, TodoAction::NavigateBack);
        prop_assert_eq!(state.highlighted_filter(), Filter::Active);
        send(&mut state, TodoAction::NavigateBack);
        prop_assert_eq!(state.highlighted_filter(), Filter::All);
        send(&mut state, TodoAction::NavigateForward);
        prop_assert_eq!(state.highlighted_filter(), Filter::Active);
    }

    /// Ids stay unique across any history, reset included.
    #[test]
    fn ids_are_never_reused(state in arb_state()) {
        let mut state = state;
        let seen: HashSet<TodoId> = state.store.items().iter().map(|i| i.id).collect();
        send(&mut state, TodoAction::Reset);
        send(&mut state, TodoAction::AddTodo { text: "fresh".to_string() });

        let fresh = state.store.items()[0].id;
        prop_assert!(!seen.contains(&fresh));
    }
}
