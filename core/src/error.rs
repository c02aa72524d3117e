//! Error types for the to-do state machine.
//!
//! Only two conditions are errors. Empty input, redundant toggles and
//! navigating past either end of the filter history are silent no-ops.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`TodoStore`](crate::store::TodoStore) and
/// [`ViewRouter`](crate::router::ViewRouter) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoError {
    /// The operation referenced an item that does not exist.
    ///
    /// Usually a stale UI event (the item was deleted or cleared in the
    /// meantime). Callers are expected to ignore or report it.
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// The filter value is not one of `all`, `active` or `completed`.
    #[error("Invalid filter: {0:?}")]
    InvalidFilter(String),
}

impl TodoError {
    /// Stable machine-readable code for the error kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidFilter(_) => "INVALID_FILTER",
        }
    }
}

/// Result alias for to-do operations.
pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = TodoError::NotFound(TodoId::new(7));
        assert_eq!(err.to_string(), "Todo with ID 7 not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn invalid_filter_message_quotes_input() {
        let err = TodoError::InvalidFilter("done".to_string());
        assert_eq!(err.to_string(), "Invalid filter: \"done\"");
        assert_eq!(err.code(), "INVALID_FILTER");
    }
}
