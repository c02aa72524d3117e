//! # TodoMPA Runtime
//!
//! The Store runtime that owns a session and serialises every action
//! through its reducer.
//!
//! ## Core Components
//!
//! - **Store**: holds state behind a lock and runs the reducer under it
//! - **Notifications**: every `Effect::Notify` is broadcast to subscribers
//! - **Health**: liveness/readiness checks for the presentation layer
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use todomvc_core::environment::SystemClock;
//! use todomvc_core::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use todomvc_runtime::Store;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), todomvc_runtime::StoreError> {
//! let store = Store::new(
//!     TodoState::new(),
//!     TodoReducer::new(),
//!     TodoEnvironment::new(Arc::new(SystemClock)),
//! );
//!
//! store.send(TodoAction::AddTodo { text: "feed the cat".to_string() }).await?;
//!
//! let left = store.state(|s| s.count()).await;
//! assert_eq!(left, 1);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use todomvc_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for in-flight actions
        #[error("Shutdown timed out with {0} actions still in flight")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Health check status levels
///
/// Indicates the current health state of a component or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,

    /// Component is not operational
    Unhealthy,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Check if status is unhealthy
    #[must_use]
    pub const fn is_unhealthy(self) -> bool {
        matches!(self, Self::Unhealthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Optional metadata (e.g., subscriber counts)
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Default capacity of the notification broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Decrements the in-flight counter when a `send` finishes, even on panic
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, Effect, HealthCheck, InFlightGuard, Ordering,
        Reducer, RwLock, StoreError, DEFAULT_BROADCAST_CAPACITY,
    };
    use std::marker::PhantomData;
    use todomvc_core::{Notification, SmallVec};
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Notification fan-out to subscribers
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        in_flight: Arc<AtomicUsize>,
        /// Every notification produced by the reducer, in application order
        notifications: broadcast::Sender<Notification>,
        _action: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The notification channel buffers [`DEFAULT_BROADCAST_CAPACITY`]
        /// entries; use [`Store::with_broadcast_capacity`] to change it.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(
                initial_state,
                reducer,
                environment,
                DEFAULT_BROADCAST_CAPACITY,
            )
        }

        /// Create a new Store with custom notification broadcast capacity
        ///
        /// Increase the capacity if subscribers frequently lag. A capacity of
        /// zero is raised to one.
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (notifications, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                in_flight: Arc::new(AtomicUsize::new(0)),
                notifications,
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Broadcasts the notifications among the returned effects
        ///
        /// Concurrent `send()` calls serialize on the write lock, so actions
        /// apply one at a time in the order they acquire it. A reader never
        /// observes a partially applied action.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        /// Domain rejections are not errors here: they come back as
        /// [`Effect::Rejected`].
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<SmallVec<[Effect; 4]>, StoreError> {
            self.send_and_read(action, |_| ())
                .await
                .map(|(effects, ())| effects)
        }

        /// Send an action and read the resulting state under the same lock
        ///
        /// For request-response callers that must answer with what their
        /// own action produced (the item just created, say) without another
        /// action slipping in between.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip_all, name = "store_send_and_read")]
        pub async fn send_and_read<F, T>(
            &self,
            action: A,
            read: F,
        ) -> Result<(SmallVec<[Effect; 4]>, T), StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("todomvc_store_shutdown_rejected_total").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let _guard = InFlightGuard::enter(&self.in_flight);
            metrics::counter!("todomvc_store_actions_total").increment(1);

            let (effects, value) = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                (effects, read(&*state))
            };

            for effect in &effects {
                match effect {
                    Effect::None => {}
                    Effect::Notify(notification) => {
                        // No subscribers is fine
                        let _ = self.notifications.send(*notification);
                    }
                    Effect::Rejected(error) => {
                        tracing::debug!(code = error.code(), %error, "Action rejected");
                        metrics::counter!("todomvc_store_rejections_total").increment(1);
                    }
                }
            }

            tracing::debug!(effects = effects.len(), "Action processed");
            Ok((effects, value))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let left = store.state(|s| s.count()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to notifications
        ///
        /// Only notifications produced after subscribing are received. A
        /// receiver that falls more than the channel capacity behind gets
        /// `RecvError::Lagged` and skips ahead.
        #[must_use]
        pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
            self.notifications.subscribe()
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Perform a health check on the Store
        ///
        /// Healthy while accepting actions, unhealthy once shutdown began.
        #[must_use]
        pub fn health(&self) -> HealthCheck {
            let check = if self.is_shutting_down() {
                HealthCheck::unhealthy("store", "Store is shutting down")
            } else {
                HealthCheck::healthy("store")
            };

            check
                .with_metadata(
                    "in_flight",
                    self.in_flight.load(Ordering::Acquire).to_string(),
                )
                .with_metadata(
                    "subscribers",
                    self.notifications.receiver_count().to_string(),
                )
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), then waits for
        /// actions already inside `send` to finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before in-flight actions complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.in_flight.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("Store drained, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(in_flight = pending, "Shutdown timeout");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicates_and_display() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Healthy.is_unhealthy());
        assert!(HealthStatus::Unhealthy.is_unhealthy());
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(HealthStatus::Unhealthy.to_string(), "unhealthy");
    }

    #[test]
    fn in_flight_guard_balances_counter() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _a = InFlightGuard::enter(&counter);
            let _b = InFlightGuard::enter(&counter);
            assert_eq!(counter.load(Ordering::Acquire), 2);
        }
        assert_eq!(counter.load(Ordering::Acquire), 0);
    }

    #[test]
    fn health_check_serializes_lowercase_status() {
        let check = HealthCheck::healthy("store").with_metadata("in_flight", "0");
        let json = serde_json::to_value(&check).unwrap_or_default();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("message").is_none());
    }
}
