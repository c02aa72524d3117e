//! Page and filter routing endpoints.
//!
//! - GET /, /active, /completed - select a filter and render the page
//! - GET /view - render the page without navigating
//! - POST /filter - follow a filter link given as a name or path
//! - POST /history/back, /history/forward - browser history navigation

use super::{dispatch_and_read, Triggered};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Form, Json};
use serde::Deserialize;
use todomvc_core::{Filter, TodoAction, TodoState, TodoView};

/// Filter link form
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// Filter name or route path, e.g. `active` or `/completed`
    pub filter: String,
}

type PageResponse = Result<Triggered<Json<TodoView>>, AppError>;

async fn show(state: &AppState, action: TodoAction) -> PageResponse {
    Ok(dispatch_and_read(state, action, TodoState::view)
        .await?
        .map(Json))
}

async fn select(state: &AppState, filter: Filter) -> PageResponse {
    show(state, TodoAction::SelectFilter { filter }).await
}

/// GET / - all items
pub async fn index(State(state): State<AppState>) -> PageResponse {
    select(&state, Filter::All).await
}

/// GET /active - active items
pub async fn active(State(state): State<AppState>) -> PageResponse {
    select(&state, Filter::Active).await
}

/// GET /completed - completed items
pub async fn completed(State(state): State<AppState>) -> PageResponse {
    select(&state, Filter::Completed).await
}

/// GET /view - current page without touching history
pub async fn view(State(state): State<AppState>) -> Json<TodoView> {
    Json(state.store.state(TodoState::view).await)
}

/// POST /filter
///
/// # Errors
///
/// 400 when the filter is unknown.
pub async fn navigate(State(state): State<AppState>, Form(form): Form<FilterForm>) -> PageResponse {
    show(&state, TodoAction::Navigate { path: form.filter }).await
}

/// POST /history/back
pub async fn back(State(state): State<AppState>) -> PageResponse {
    show(&state, TodoAction::NavigateBack).await
}

/// POST /history/forward
pub async fn forward(State(state): State<AppState>) -> PageResponse {
    show(&state, TodoAction::NavigateForward).await
}
