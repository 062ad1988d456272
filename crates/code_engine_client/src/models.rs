//! Wire types for the IAM and Code Engine APIs.

use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Successful response from the IAM token endpoint.
///
/// Only the field the client needs; IAM also returns expiry and refresh
/// metadata which this single-shot client never uses.
#[derive(Debug, Deserialize)]
pub struct IamTokenResponse {
    /// Bearer token to present to the Code Engine API.
    pub access_token: String,
}

/// Error body shape returned by the Code Engine API.
///
/// The platform wraps failures in an `errors` array; some intermediaries
/// return a bare `message` instead, so both are tolerated.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,

    #[serde(default)]
    pub message: Option<String>,
}

/// One entry of a Code Engine `errors` array.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,

    pub message: String,
}

/// Extract the most useful human-readable message from an error response
/// body, falling back to the raw text when it is not the documented shape.
pub fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(detail) = envelope.errors.first() {
            return detail.message.clone();
        }
        if let Some(message) = envelope.message {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_string()
    } else {
        trimmed.to_string()
    }
}
