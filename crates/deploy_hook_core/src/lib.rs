//! Core pipeline for the DeployHook webhook receiver.
//!
//! One inbound GitHub Actions `workflow_run` completion event flows through
//! four stages, each of which can short-circuit with a terminal error:
//!
//! 1. **Tag extraction**: derive the image tag from `workflow_run.head_sha`;
//!    a missing SHA is rejected before any secret-touching logic runs.
//! 2. **Validation**: structural checks that the signature header was
//!    injected and the payload carries a `workflow_run` object.
//! 3. **Signature verification**: HMAC-SHA256 over the canonical payload,
//!    compared in constant time.
//! 4. **Update coordination**: fetch the Code Engine application, patch its
//!    `image_reference` conditioned on the freshly read entity tag.
//!
//! The pipeline is stateless between invocations: no caches, no shared
//! mutable state, no retries. Ordering guarantees come entirely from the
//! platform's conditional-write primitive.

use secrecy::ExposeSecret;

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod payload;
pub mod signature;

pub use config::Config;
pub use coordinator::{
    image_reference, region_prefix, update_application, AppPatch, AppSnapshot, AppUpdated,
    ApplicationApi, UpdateOutcome,
};
pub use errors::{Error, Result};
pub use payload::{ImageTag, WebhookPayload, HEADERS_KEY, SIGNATURE_HEADER};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Process one webhook event end to end.
///
/// Runs the full pipeline and returns the update outcome on success. Every
/// failure maps to exactly one [`Error`] variant, which the HTTP layer turns
/// into the corresponding response.
///
/// # Errors
///
/// - [`Error::MissingImageTag`] when the payload carries no usable SHA.
/// - [`Error::Validation`] when a structural prerequisite is missing.
/// - [`Error::SignatureMismatch`] when the sender cannot be authenticated.
/// - [`Error::Upstream`] when the Code Engine call fails, conditional-update
///   conflicts included.
pub async fn process_event(
    payload: &WebhookPayload,
    config: &Config,
    api: &dyn ApplicationApi,
) -> Result<UpdateOutcome> {
    let tag = payload.image_tag()?;
    payload.validate()?;

    // validate() guarantees the header is present.
    let signature_header = payload
        .signature_header()
        .ok_or(Error::SignatureMismatch)?;
    signature::verify(
        payload.fields(),
        config.webhook_secret.expose_secret().as_bytes(),
        signature_header,
    )?;

    tracing::info!(tag = %tag, "Webhook verified, updating application");
    update_application(api, config, &tag).await
}
