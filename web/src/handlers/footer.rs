//! Footer and toggle-all controls.
//!
//! - GET /active-counter - "N items left"
//! - GET /clear-completed - whether the clear button is shown
//! - PATCH /clear-completed - remove completed items
//! - GET /complete-all - toggle-all checkbox state
//! - PUT /complete-all - click the checkbox, or set an explicit value

use super::{dispatch_and_read, Triggered};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use todomvc_core::session::counter_text;
use todomvc_core::{TodoAction, TodoItem, TodoState};

/// Active item counter
#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveCounter {
    /// Number of active items
    pub todos_left: usize,
    /// Rendered counter, e.g. `"2 items left"`
    pub text: String,
}

/// Clear-completed button state
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCompletedStatus {
    /// Whether the button is shown
    pub visible: bool,
    /// Number of completed items it would remove
    pub completed: usize,
}

/// Toggle-all checkbox state
#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteAllStatus {
    /// Whether the checkbox is checked
    pub all_completed: bool,
}

/// Toggle-all form; without `completed` the checkbox is clicked
#[derive(Debug, Default, Deserialize)]
pub struct CompleteAllForm {
    /// Explicit value for every item
    pub completed: Option<bool>,
}

/// Whether the request declares a non-empty body
fn has_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .is_some_and(|len| len > 0)
        || headers.contains_key(header::TRANSFER_ENCODING)
}

fn visible_items(state: &TodoState) -> Vec<TodoItem> {
    state.visible_items().into_iter().cloned().collect()
}

/// GET /active-counter
pub async fn active_counter(State(state): State<AppState>) -> Json<ActiveCounter> {
    let todos_left = state.store.state(TodoState::count).await;
    Json(ActiveCounter {
        todos_left,
        text: counter_text(todos_left),
    })
}

/// GET /clear-completed
pub async fn clear_completed_status(State(state): State<AppState>) -> Json<ClearCompletedStatus> {
    let completed = state.store.state(|s| s.store.completed_count()).await;
    Json(ClearCompletedStatus {
        visible: completed > 0,
        completed,
    })
}

/// PATCH /clear-completed
///
/// Answers with the visible items afterwards.
pub async fn clear_completed(
    State(state): State<AppState>,
) -> Result<Triggered<Json<Vec<TodoItem>>>, AppError> {
    Ok(
        dispatch_and_read(&state, TodoAction::ClearCompleted, visible_items)
            .await?
            .map(Json),
    )
}

/// GET /complete-all
pub async fn complete_all_status(State(state): State<AppState>) -> Json<CompleteAllStatus> {
    Json(CompleteAllStatus {
        all_completed: state.store.state(TodoState::all_completed).await,
    })
}

/// PUT /complete-all
///
/// A request without a body, or a form without a `completed` field, is a
/// checkbox click. Answers with the visible items afterwards.
///
/// # Errors
///
/// 400 when `completed` is not a boolean, or when a non-form body is sent.
pub async fn complete_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<CompleteAllForm>, FormRejection>,
) -> Result<Triggered<Json<Vec<TodoItem>>>, AppError> {
    let completed = match form {
        Ok(Form(form)) => form.completed,
        Err(FormRejection::InvalidFormContentType(_)) if !has_body(&headers) => None,
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected complete-all form");
            return Err(AppError::bad_request(rejection.body_text()));
        }
    };
    let action = match completed {
        Some(completed) => TodoAction::ToggleAll { completed },
        None => TodoAction::CompleteAll,
    };

    Ok(dispatch_and_read(&state, action, visible_items).await?.map(Json))
}
