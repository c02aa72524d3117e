//! Route table.

use crate::handlers::{footer, health, page, session, todos};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Builds the application router over `state`.
///
/// Every route is wrapped in correlation-id tracking and HTTP tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages and history
        .route("/", get(page::index))
        .route("/active", get(page::active))
        .route("/completed", get(page::completed))
        .route("/view", get(page::view))
        .route("/filter", post(page::navigate))
        .route("/history/back", post(page::back))
        .route("/history/forward", post(page::forward))
        // Items
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/:id", get(todos::show).delete(todos::delete))
        .route("/todos/:id/toggle", patch(todos::toggle))
        .route(
            "/todos/:id/edit",
            get(todos::begin_edit)
                .patch(todos::commit_edit)
                .delete(todos::cancel_edit),
        )
        // Footer
        .route("/active-counter", get(footer::active_counter))
        .route(
            "/clear-completed",
            get(footer::clear_completed_status).patch(footer::clear_completed),
        )
        .route(
            "/complete-all",
            get(footer::complete_all_status).put(footer::complete_all),
        )
        .route("/reset", post(session::reset))
        // Health
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
