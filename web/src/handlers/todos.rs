//! Item endpoints.
//!
//! - GET /todos - visible items
//! - POST /todos - add an item (form field `todo`)
//! - GET /todos/:id - one item
//! - DELETE /todos/:id - remove an item
//! - PATCH /todos/:id/toggle - flip completion
//! - GET /todos/:id/edit - open the edit buffer
//! - PATCH /todos/:id/edit - commit the edit (form field `todo`); blank removes
//! - DELETE /todos/:id/edit - cancel the edit

use super::{dispatch, dispatch_and_read, Triggered};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use todomvc_core::{EditBuffer, Notification, TodoAction, TodoError, TodoId, TodoItem};

/// Item text form, as submitted by the new-item and edit inputs
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    /// Raw input text
    #[serde(default)]
    pub todo: String,
}

/// GET /todos
pub async fn list(State(state): State<AppState>) -> Json<Vec<TodoItem>> {
    let items = state
        .store
        .state(|s| s.visible_items().into_iter().cloned().collect())
        .await;
    Json(items)
}

/// POST /todos
///
/// 201 with the new item, or 204 when the input was blank.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let triggered = dispatch_and_read(&state, TodoAction::AddTodo { text: form.todo }, |s| {
        s.store.items().last().cloned()
    })
    .await?;

    Ok(match triggered.body {
        Some(item) if triggered.notifications.contains(&Notification::NewTodo) => {
            tracing::info!(id = %item.id, "Todo created");
            Triggered::new(triggered.notifications, (StatusCode::CREATED, Json(item)))
                .into_response()
        }
        _ => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /todos/:id
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<TodoItem>, AppError> {
    state
        .store
        .state(|s| s.store.get(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| TodoError::NotFound(id).into())
}

/// DELETE /todos/:id
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Triggered<StatusCode>, AppError> {
    let notifications = dispatch(&state, TodoAction::DeleteTodo { id }).await?;
    Ok(Triggered::new(notifications, StatusCode::NO_CONTENT))
}

/// PATCH /todos/:id/toggle
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Triggered<Json<TodoItem>>, AppError> {
    item_after(&state, TodoAction::ToggleTodo { id }, id).await
}

/// GET /todos/:id/edit
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Triggered<Json<EditBuffer>>, AppError> {
    let triggered = dispatch_and_read(&state, TodoAction::BeginEdit { id }, |s| {
        s.store.editing().cloned()
    })
    .await?;

    match triggered.body {
        Some(buffer) if buffer.id == id => {
            Ok(Triggered::new(triggered.notifications, Json(buffer)))
        }
        _ => Err(TodoError::NotFound(id).into()),
    }
}

/// PATCH /todos/:id/edit
///
/// The updated item, or 204 when blank text removed it.
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn commit_edit(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let triggered = dispatch_and_read(
        &state,
        TodoAction::CommitEdit { id, text: form.todo },
        |s| s.store.get(id).cloned(),
    )
    .await?;

    Ok(match triggered.body {
        Some(item) => Triggered::new(triggered.notifications, Json(item)).into_response(),
        None => Triggered::new(triggered.notifications, StatusCode::NO_CONTENT).into_response(),
    })
}

/// DELETE /todos/:id/edit
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Triggered<Json<TodoItem>>, AppError> {
    item_after(&state, TodoAction::CancelEdit { id }, id).await
}

/// Applies `action` and answers with item `id` as it stands afterwards
async fn item_after(
    state: &AppState,
    action: TodoAction,
    id: TodoId,
) -> Result<Triggered<Json<TodoItem>>, AppError> {
    let triggered = dispatch_and_read(state, action, |s| s.store.get(id).cloned()).await?;
    match triggered.body {
        Some(item) => Ok(Triggered::new(triggered.notifications, Json(item))),
        None => Err(TodoError::NotFound(id).into()),
    }
}
