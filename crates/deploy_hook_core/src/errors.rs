//! Error types for webhook processing.
//!
//! Every failure mode of the deployment pipeline maps to exactly one variant
//! here, and every variant maps to exactly one HTTP response shape at the API
//! boundary. Nothing is retried and nothing is silently swallowed.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while processing a workflow-run webhook.
///
/// The variants mirror the response table of the service:
///
/// | Variant | HTTP status |
/// |---------|-------------|
/// | `MissingConfiguration` | fatal at startup, never reaches HTTP |
/// | `Validation` | 400 |
/// | `MissingImageTag` | 400 |
/// | `SignatureMismatch` | 403 |
/// | `Upstream` | 500 |
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable was absent at startup.
    ///
    /// Configuration is validated once when the process starts; this variant
    /// aborts startup and is never produced on the request path.
    #[error("{0} environment variable not found")]
    MissingConfiguration(&'static str),

    /// The payload failed a structural check before any trust decision.
    ///
    /// Distinct from [`Error::SignatureMismatch`]: these checks run before
    /// signature verification, so unauthenticated callers can trigger them.
    /// The message names the missing field and leaks no secret state.
    #[error("{0}")]
    Validation(String),

    /// The supplied `X-Hub-Signature-256` header did not match the HMAC
    /// computed over the canonical payload.
    ///
    /// The message is deliberately fixed: the computed digest must never be
    /// echoed back to the caller.
    #[error("Request signatures didn't match!")]
    SignatureMismatch,

    /// The payload carries no usable `workflow_run.head_sha`.
    #[error("Missing image tag")]
    MissingImageTag,

    /// The Code Engine API call failed.
    ///
    /// Covers network errors, permission errors and conditional-update
    /// conflicts alike; the upstream message is surfaced verbatim. The caller
    /// is expected to rely on the webhook sender's retry policy.
    #[error("{0}")]
    Upstream(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
