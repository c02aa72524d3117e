//! Filter selection with back/forward history.
//!
//! The router stores filters only, never item snapshots. Visibility is
//! recomputed against the live [`TodoStore`] every time it is read, so going
//! back to a filter shows the current items that match it.

use crate::error::Result;
use crate::store::TodoStore;
use crate::types::{Filter, TodoItem};
use serde::{Deserialize, Serialize};

/// Maximum number of history entries kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Current filter plus a bounded back/forward history
///
/// Invariant: `history` is never empty, `cursor < history.len()` and
/// `history.len() <= limit`. Deserialization rejects values breaking it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RouterParts")]
pub struct ViewRouter {
    history: Vec<Filter>,
    cursor: usize,
    limit: usize,
}

/// Unchecked wire form of [`ViewRouter`]
#[derive(Deserialize)]
struct RouterParts {
    history: Vec<Filter>,
    cursor: usize,
    limit: usize,
}

impl TryFrom<RouterParts> for ViewRouter {
    type Error = String;

    fn try_from(parts: RouterParts) -> std::result::Result<Self, Self::Error> {
        let RouterParts {
            history,
            cursor,
            limit,
        } = parts;

        if history.is_empty() {
            return Err("router history is empty".to_string());
        }
        if cursor >= history.len() {
            return Err(format!(
                "router cursor {cursor} is past {} history entries",
                history.len()
            ));
        }
        if limit == 0 || history.len() > limit {
            return Err(format!(
                "router history holds {} entries but the limit is {limit}",
                history.len()
            ));
        }

        Ok(Self {
            history,
            cursor,
            limit,
        })
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// Creates a router showing [`Filter::All`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a router keeping at most `limit` history entries (minimum 1)
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            history: vec![Filter::All],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// The filter currently applied
    #[must_use]
    pub fn current(&self) -> Filter {
        self.history[self.cursor]
    }

    /// The filter to render as selected. Always equal to [`Self::current`].
    #[must_use]
    pub fn highlighted_filter(&self) -> Filter {
        self.current()
    }

    /// Applies `filter` and pushes it as a new history entry.
    ///
    /// Forward entries are discarded. When the history is full the oldest
    /// entry is dropped.
    pub fn set_filter(&mut self, filter: Filter) {
        self.history.truncate(self.cursor + 1);
        self.history.push(filter);
        if self.history.len() > self.limit {
            let excess = self.history.len() - self.limit;
            self.history.drain(..excess);
        }
        self.cursor = self.history.len() - 1;
    }

    /// Parses `filter` (a name or a route path) and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidFilter`](crate::error::TodoError::InvalidFilter)
    /// if the value is not a known filter. History is left untouched.
    pub fn navigate(&mut self, filter: &str) -> Result<Filter> {
        let filter = filter.parse()?;
        self.set_filter(filter);
        Ok(filter)
    }

    /// Steps back one entry. Returns `false` at the oldest entry.
    pub fn go_back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Steps forward one entry. Returns `false` at the newest entry.
    pub fn go_forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if there is an earlier entry
    #[must_use]
    pub const fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if there is a later entry
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Items of `store` visible under the current filter, in list order
    #[must_use]
    pub fn visible_items<'a>(&self, store: &'a TodoStore) -> Vec<&'a TodoItem> {
        let filter = self.current();
        store
            .items()
            .iter()
            .filter(|item| filter.matches(item))
            .collect()
    }

    /// Returns to a single [`Filter::All`] entry, keeping the limit
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(Filter::All);
        self.cursor = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::error::TodoError;
    use chrono::Utc;

    #[test]
    fn starts_on_all() {
        let router = ViewRouter::new();
        assert_eq!(router.current(), Filter::All);
        assert_eq!(router.highlighted_filter(), Filter::All);
        assert!(!router.can_go_back());
        assert!(!router.can_go_forward());
    }

    #[test]
    fn back_restores_previous_filters() {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);
        router.set_filter(Filter::Completed);

        assert!(router.go_back());
        assert_eq!(router.highlighted_filter(), Filter::Active);
        assert!(router.go_back());
        assert_eq!(router.highlighted_filter(), Filter::All);
        assert!(!router.go_back());
        assert_eq!(router.current(), Filter::All);
    }

    #[test]
    fn forward_replays_and_stops_at_end() {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);
        router.go_back();

        assert!(router.go_forward());
        assert_eq!(router.current(), Filter::Active);
        assert!(!router.go_forward());
    }

    #[test]
    fn set_filter_discards_forward_entries() {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);
        router.set_filter(Filter::Completed);
        router.go_back();
        router.go_back();

        router.set_filter(Filter::Completed);

        assert!(!router.can_go_forward());
        assert!(router.go_back());
        assert_eq!(router.current(), Filter::All);
    }

    #[test]
    fn history_is_bounded() {
        let mut router = ViewRouter::with_limit(3);
        router.set_filter(Filter::Active);
        router.set_filter(Filter::Completed);
        router.set_filter(Filter::All);

        assert!(router.go_back());
        assert!(router.go_back());
        assert!(!router.go_back());
        assert_eq!(router.current(), Filter::Active);
    }

    #[test]
    fn navigate_rejects_unknown_filter() {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);

        let err = router.navigate("/done").unwrap_err();

        assert_eq!(err, TodoError::InvalidFilter("/done".to_string()));
        assert_eq!(router.current(), Filter::Active);
        assert!(router.can_go_back());
    }

    #[test]
    fn navigate_accepts_paths() {
        let mut router = ViewRouter::new();
        assert_eq!(router.navigate("/completed").unwrap(), Filter::Completed);
        assert_eq!(router.current(), Filter::Completed);
    }

    #[test]
    fn visible_items_follow_live_store() {
        let mut store = TodoStore::new();
        let one = store.add("one", Utc::now()).unwrap();
        let two = store.add("two", Utc::now()).unwrap();
        let three = store.add("three", Utc::now()).unwrap();
        store.toggle(two, Utc::now()).unwrap();

        let mut router = ViewRouter::new();
        router.set_filter(Filter::Active);
        let ids: Vec<_> = router.visible_items(&store).iter().map(|i| i.id).collect();
        assert_eq!(ids, [one, three]);

        router.set_filter(Filter::Completed);
        store.toggle(one, Utc::now()).unwrap();
        router.go_back();
        let ids: Vec<_> = router.visible_items(&store).iter().map(|i| i.id).collect();
        assert_eq!(ids, [three]);
    }

    #[test]
    fn deserialization_keeps_a_valid_router() {
        let mut router = ViewRouter::with_limit(5);
        router.set_filter(Filter::Active);
        router.set_filter(Filter::Completed);
        router.go_back();

        let json = serde_json::to_string(&router).unwrap();
        let restored: ViewRouter = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, router);
        assert_eq!(restored.current(), Filter::Active);
        assert!(restored.can_go_forward());
    }

    #[test]
    fn deserialization_rejects_broken_history() {
        for json in [
            r#"{"history":[],"cursor":0,"limit":100}"#,
            r#"{"history":["all","active"],"cursor":2,"limit":100}"#,
            r#"{"history":["all","active"],"cursor":0,"limit":1}"#,
            r#"{"history":["all"],"cursor":0,"limit":0}"#,
        ] {
            assert!(
                serde_json::from_str::<ViewRouter>(json).is_err(),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn reset_returns_to_all() {
        let mut router = ViewRouter::new();
        router.set_filter(Filter::Completed);

        router.reset();

        assert_eq!(router.current(), Filter::All);
        assert!(!router.can_go_back());
    }
}
