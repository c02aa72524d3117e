//! HTTP shell for the TodoMPA session.
//!
//! Implements the "Functional Core, Imperative Shell" split: the core crate
//! decides what every input event does, this crate only translates.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← routes, forms, JSON
//! │  - Request parsing                      │  ← HX-Trigger headers
//! │  - Response serialization               │  ← tracing, correlation ids
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - TodoStore + ViewRouter               │  ← no I/O
//! │  - Notifications as values              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. A handler extracts the form or path parameters
//! 2. It builds a [`todomvc_core::TodoAction`]
//! 3. The session [`state::SessionStore`] applies it
//! 4. Rejections become [`AppError`]s, notifications become `HX-Trigger`
//! 5. The derived state is rendered as JSON

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use middleware::{correlation_id_layer, CorrelationId, CORRELATION_ID_HEADER};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
