//! Application update coordination.
//!
//! Implements the read-modify-write sequence against the Code Engine
//! application record: fetch the current snapshot, compute the new image
//! reference from the verified tag, and submit a patch conditioned on the
//! entity tag read in the same request. Optimistic concurrency is delegated
//! entirely to the platform's `If-Match` primitive; of a set of racing
//! deliveries exactly one wins and the losers surface as upstream failures.
//! No retries happen here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::Result;
use crate::payload::ImageTag;

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

/// Snapshot of a Code Engine application as returned by a fetch.
///
/// Only the fields this service reads; the platform returns many more.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSnapshot {
    /// Concurrency token; changes on every successful write.
    pub entity_tag: String,

    /// Image the application currently runs.
    #[serde(default)]
    pub image_reference: Option<String>,

    /// Revision currently serving traffic, when one is ready.
    #[serde(default)]
    pub latest_ready_revision: Option<String>,
}

/// Result of a successful conditional update.
#[derive(Debug, Clone, Deserialize)]
pub struct AppUpdated {
    /// Revision the platform reports as ready after the patch.
    #[serde(default)]
    pub latest_ready_revision: Option<String>,
}

/// The single field this service ever patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppPatch {
    /// Fully qualified image reference, including registry host and tag.
    pub image_reference: String,
}

/// Outcome handed back to the HTTP layer after a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Revision identifier reported by the platform.
    pub latest_ready_revision: Option<String>,
}

/// The two Code Engine operations this service performs.
///
/// The trait is the seam between the coordination logic and the HTTP client;
/// tests substitute an in-memory implementation.
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Fetch the current application record.
    async fn get_app(&self, project_id: &str, name: &str) -> Result<AppSnapshot>;

    /// Patch the application, conditioned on `if_match`.
    ///
    /// The platform rejects the write when `if_match` no longer matches the
    /// record's current entity tag.
    async fn update_app(
        &self,
        project_id: &str,
        name: &str,
        if_match: &str,
        patch: &AppPatch,
    ) -> Result<AppUpdated>;
}

/// Region identifier with a trailing availability-zone suffix removed.
///
/// `us-south-2` becomes `us-south`; `us-south` and `eu-de` pass through
/// unchanged. Used for both the Code Engine service endpoint and the
/// Container Registry host.
pub fn region_prefix(region: &str) -> &str {
    match region.rsplit_once('-') {
        Some((prefix, zone)) if !zone.is_empty() && zone.bytes().all(|b| b.is_ascii_digit()) => {
            prefix
        }
        _ => region,
    }
}

/// Compute the image reference the application should run.
///
/// Shape: `private.<region-prefix>.icr.io/<namespace>/<image>:<short_tag>`.
pub fn image_reference(config: &Config, tag: &ImageTag) -> String {
    format!(
        "private.{}.icr.io/{}/{}:{}",
        region_prefix(&config.region),
        config.registry_namespace,
        config.registry_image,
        tag
    )
}

/// Run the fetch-then-conditional-update sequence for one verified event.
///
/// The patch is conditioned on the entity tag read in the immediately
/// preceding fetch, never on a cached value; that is what guarantees
/// at-most-one-winner semantics under concurrent deliveries.
///
/// # Errors
///
/// Any failure from the [`ApplicationApi`] collaborator, including a
/// conditional-update conflict, is returned as-is.
pub async fn update_application(
    api: &dyn ApplicationApi,
    config: &Config,
    tag: &ImageTag,
) -> Result<UpdateOutcome> {
    let app = api.get_app(&config.project_id, &config.app_name).await?;

    let patch = AppPatch {
        image_reference: image_reference(config, tag),
    };
    info!(
        app = %config.app_name,
        entity_tag = %app.entity_tag,
        image_reference = %patch.image_reference,
        "Submitting conditional app update"
    );

    let updated = api
        .update_app(&config.project_id, &config.app_name, &app.entity_tag, &patch)
        .await?;

    info!(
        app = %config.app_name,
        latest_ready_revision = updated.latest_ready_revision.as_deref().unwrap_or("(none)"),
        "App updated successfully"
    );

    Ok(UpdateOutcome {
        latest_ready_revision: updated.latest_ready_revision,
    })
}
