//! HTTP request handlers.
//!
//! Each handler turns one input event into a [`TodoAction`], dispatches it
//! through the session store, and renders derived state back as JSON.
//! Responses to mutating requests carry an `HX-Trigger` header naming the
//! notifications the action produced.

use crate::error::AppError;
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use todomvc_core::{Effect, Notification, TodoAction, TodoState};

pub mod footer;
pub mod health;
pub mod page;
pub mod session;
pub mod todos;

/// Header listing the notifications a response was produced by
pub const HX_TRIGGER_HEADER: &str = "HX-Trigger";

/// Response body plus the notifications to announce with it
#[derive(Debug)]
pub struct Triggered<T> {
    /// Notifications produced by the action, in order
    pub notifications: Vec<Notification>,
    /// Response body
    pub body: T,
}

impl<T> Triggered<T> {
    /// Wraps `body` with the notifications it follows from
    pub const fn new(notifications: Vec<Notification>, body: T) -> Self {
        Self {
            notifications,
            body,
        }
    }

    /// Transforms the body, keeping the notifications
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Triggered<U> {
        Triggered::new(self.notifications, f(self.body))
    }

    /// Header value, `None` when nothing changed
    fn header_value(&self) -> Option<HeaderValue> {
        if self.notifications.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.notifications.iter().map(|n| n.trigger()).collect();
        HeaderValue::from_str(&names.join(", ")).ok()
    }
}

impl<T: IntoResponse> IntoResponse for Triggered<T> {
    fn into_response(self) -> Response {
        let header = self.header_value();
        let mut response = self.body.into_response();
        if let Some(value) = header {
            response.headers_mut().insert(HX_TRIGGER_HEADER, value);
        }
        response
    }
}

/// Splits effects into notifications, failing on the first rejection
fn notifications(effects: impl IntoIterator<Item = Effect>) -> Result<Vec<Notification>, AppError> {
    let mut notifications = Vec::new();
    for effect in effects {
        match effect {
            Effect::None => {}
            Effect::Notify(notification) => notifications.push(notification),
            Effect::Rejected(error) => return Err(error.into()),
        }
    }
    Ok(notifications)
}

/// Sends `action` and returns the notifications it produced.
pub(crate) async fn dispatch(
    state: &AppState,
    action: TodoAction,
) -> Result<Vec<Notification>, AppError> {
    let effects = state.store.send(action).await?;
    notifications(effects)
}

/// Sends `action` and reads the resulting state under the same lock.
pub(crate) async fn dispatch_and_read<F, T>(
    state: &AppState,
    action: TodoAction,
    read: F,
) -> Result<Triggered<T>, AppError>
where
    F: FnOnce(&TodoState) -> T + Send,
{
    let (effects, value) = state.store.send_and_read(action, read).await?;
    Ok(Triggered::new(notifications(effects)?, value))
}
