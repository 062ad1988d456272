//! Error handling and HTTP error conversion.
//!
//! Pipeline errors are converted to HTTP responses at this boundary, and only
//! here. The mapping is fixed:
//!
//! | Pipeline error | Status | Body |
//! |---|---|---|
//! | `MissingImageTag` | 400 | `Missing image tag` (text) |
//! | `Validation` | 400 | descriptive text |
//! | `SignatureMismatch` | 403 | `Request signatures didn't match!` (text) |
//! | `Upstream` | 500 | `{"error": "<message>"}` |
//! | `MissingConfiguration` | 500 | `{"error": "<message>"}` (startup aborts first; never reached in practice) |

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use deploy_hook_core::Error;

use crate::models::response::ErrorBody;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Content type of the plain-text rejection responses.
const TEXT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Axum response wrapper for pipeline errors.
///
/// Wraps a [`deploy_hook_core::Error`] so it renders as the corresponding
/// HTTP response.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        log_error(&self.0, status);

        match &self.0 {
            Error::Upstream(message) => (
                status,
                Json(ErrorBody {
                    error: message.clone(),
                }),
            )
                .into_response(),
            Error::MissingConfiguration(_) => (
                status,
                Json(ErrorBody {
                    error: self.0.to_string(),
                }),
            )
                .into_response(),
            other => (
                status,
                [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
                other.to_string(),
            )
                .into_response(),
        }
    }
}

/// HTTP status for each pipeline error category.
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) | Error::MissingImageTag => StatusCode::BAD_REQUEST,
        Error::SignatureMismatch => StatusCode::FORBIDDEN,
        Error::Upstream(_) | Error::MissingConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log with a level matching the response status.
fn log_error(error: &Error, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!("Webhook rejected: {} - {}", status, error);
        }
        _ => {
            tracing::warn!("Webhook rejected: {} - {}", status, error);
        }
    }
}
