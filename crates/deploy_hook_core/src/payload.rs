//! Inbound webhook payload handling.
//!
//! The hosting platform hands the handler a single JSON object: the webhook
//! body as sent by GitHub, augmented with a `__ce_headers` key carrying the
//! HTTP request headers. [`WebhookPayload`] wraps that object and provides the
//! structural checks and the image-tag derivation that run before any
//! cryptographic work.

use serde_json::{Map, Value};

use crate::errors::{Error, Result};

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

/// Top-level key under which the transport injects the request headers.
pub const HEADERS_KEY: &str = "__ce_headers";

/// Header carrying the sender-supplied HMAC signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Number of characters of the commit SHA used as the image tag.
const TAG_LENGTH: usize = 8;

/// Image tag derived from the commit SHA of a workflow run.
///
/// The tag is the first eight characters of `workflow_run.head_sha`. The
/// policy intentionally performs no hex or length validation: a short or
/// malformed SHA yields a short or malformed tag that is passed on to the
/// image reference unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag(String);

impl ImageTag {
    /// Derive the tag from a commit SHA by truncating to eight characters.
    pub fn from_head_sha(head_sha: &str) -> Self {
        Self(head_sha.chars().take(TAG_LENGTH).collect())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One inbound webhook event: the parsed request body plus injected headers.
///
/// Ephemeral; exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct WebhookPayload {
    fields: Map<String, Value>,
}

impl WebhookPayload {
    /// Wrap an already-augmented payload object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a payload from a request body and its headers, injecting the
    /// headers under [`HEADERS_KEY`] the way the hosting platform does.
    pub fn from_body_and_headers<I, K, V>(body: Map<String, Value>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = body;
        let header_map: Map<String, Value> = headers
            .into_iter()
            .map(|(name, value)| (name.into(), Value::String(value.into())))
            .collect();
        fields.insert(HEADERS_KEY.to_string(), Value::Object(header_map));
        Self { fields }
    }

    /// All top-level fields, injected metadata included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up the signature header among the injected headers.
    ///
    /// Header names are matched case-insensitively; proxies are free to
    /// change the casing in flight.
    pub fn signature_header(&self) -> Option<&str> {
        let headers = self.fields.get(HEADERS_KEY)?.as_object()?;
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .and_then(|(_, value)| value.as_str())
    }

    /// Check the structural prerequisites of the request.
    ///
    /// Verifies that a signature header was injected and that the payload
    /// carries a `workflow_run` object. Runs before signature verification,
    /// so these failures are triggerable by unauthenticated callers; the
    /// messages leak no secret state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the missing field.
    pub fn validate(&self) -> Result<()> {
        if self.signature_header().is_none() {
            return Err(Error::Validation(format!(
                "Missing params.headers.{SIGNATURE_HEADER}"
            )));
        }

        if !self.fields.contains_key("workflow_run") {
            return Err(Error::Validation(
                "Missing params.workflow_run".to_string(),
            ));
        }

        Ok(())
    }

    /// Derive the image tag from `workflow_run.head_sha`.
    ///
    /// Missing nested keys are tolerated via safe navigation; absence is a
    /// client error, not a fault.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingImageTag`] when the SHA is absent or empty.
    pub fn image_tag(&self) -> Result<ImageTag> {
        let head_sha = self
            .fields
            .get("workflow_run")
            .and_then(|run| run.get("head_sha"))
            .and_then(Value::as_str)
            .filter(|sha| !sha.is_empty())
            .ok_or(Error::MissingImageTag)?;

        Ok(ImageTag::from_head_sha(head_sha))
    }
}
