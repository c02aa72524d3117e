//! Session reset.

use super::{dispatch_and_read, Triggered};
use crate::error::AppError;
use crate::middleware::CorrelationId;
use crate::state::AppState;
use axum::{extract::State, Json};
use todomvc_core::{TodoAction, TodoState, TodoView};

/// POST /reset
///
/// Clears every item and returns the router to the "all" filter.
pub async fn reset(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
) -> Result<Triggered<Json<TodoView>>, AppError> {
    tracing::info!(correlation_id = %correlation_id.0, "Resetting session");
    Ok(dispatch_and_read(&state, TodoAction::Reset, TodoState::view)
        .await?
        .map(Json))
}
