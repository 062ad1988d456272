//! HTTP response type definitions.
//!
//! The success envelope deliberately mirrors the serverless response shape
//! the webhook sender was originally integrated against: a JSON object with
//! `statusCode`, `latest_ready_revision` and `body` fields, served alongside
//! the real HTTP status.

use serde::{Deserialize, Serialize};

use deploy_hook_core::UpdateOutcome;

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Success envelope for a processed webhook.
///
/// # Example
///
/// ```json
/// {
///   "statusCode": 200,
///   "latest_ready_revision": "my-app-00005",
///   "body": "App updated successfully"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Mirrors the HTTP status for senders that only read the body.
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Revision the platform reports as ready after the patch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_ready_revision: Option<String>,

    /// Fixed human-readable confirmation.
    pub body: String,
}

impl From<UpdateOutcome> for WebhookResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            status_code: 200,
            latest_ready_revision: outcome.latest_ready_revision,
            body: "App updated successfully".to_string(),
        }
    }
}

/// Error envelope for upstream failures.
///
/// # Example
///
/// ```json
/// {"error": "Code Engine API returned 412: entity tag mismatch"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Upstream error message, verbatim.
    pub error: String,
}

/// Liveness response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process can answer at all.
    pub status: String,

    /// Crate version, for deploy verification.
    pub version: String,
}

impl HealthResponse {
    /// Build the canonical healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
