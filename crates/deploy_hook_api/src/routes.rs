//! HTTP routing configuration.
//!
//! Two routes only:
//!
//! - `POST /webhook`: the workflow-run completion receiver
//! - `GET  /health`: liveness check
//!
//! The webhook authenticates itself via the HMAC signature inside the
//! payload, so there is no authentication middleware here.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Upstream calls have no timeout of their own; this bounds the whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the complete router with tracing and timeout layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handlers::receive_webhook))
        .route("/health", get(handlers::health_check))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
