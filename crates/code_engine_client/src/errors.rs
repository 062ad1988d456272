//! Error types for Code Engine client operations.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur when talking to IAM or the Code Engine API.
///
/// Transport failures, authentication failures and API-level rejections are
/// kept distinct so callers can log them meaningfully, but all of them reach
/// the webhook pipeline as a single upstream failure: the service performs no
/// retries and surfaces the message verbatim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The IAM token exchange was rejected.
    ///
    /// Typically an invalid or revoked API key. The contained string is the
    /// IAM response detail, never the key itself.
    #[error("Failed to authenticate with IAM: {0}")]
    Auth(String),

    /// The HTTP request could not be completed.
    ///
    /// Connection errors, TLS failures and timeouts from the underlying
    /// client all land here.
    #[error("Code Engine API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Code Engine API answered with a non-success status.
    ///
    /// A 412 here means the conditional update lost the race: the entity tag
    /// submitted in `If-Match` was stale by the time the patch arrived.
    #[error("Code Engine API returned {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the error body, or the raw body text.
        message: String,
    },

    /// A service or IAM URL could not be constructed.
    #[error("Invalid Code Engine endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The app patch could not be serialized.
    #[error("Failed to serialize app patch: {0}")]
    Serialization(#[from] serde_json::Error),
}
