//! Application state for Axum handlers.

use crate::config::SessionConfig;
use std::sync::Arc;
use todomvc_core::environment::{Clock, SystemClock};
use todomvc_core::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
use todomvc_runtime::Store;

/// Store type driving the one to-do session this server hosts
pub type SessionStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// The session store
    pub store: Arc<SessionStore>,
}

impl AppState {
    /// Wraps an existing store.
    #[must_use]
    pub const fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Builds an empty session from configuration, stamped by `clock`.
    #[must_use]
    pub fn with_clock(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Store::with_broadcast_capacity(
            TodoState::with_history_limit(config.history_limit),
            TodoReducer::new(),
            TodoEnvironment::new(clock),
            config.broadcast_capacity,
        );
        Self::new(Arc::new(store))
    }

    /// Builds an empty session from configuration on the system clock.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }
}
