//! DeployHook HTTP surface.
//!
//! This crate is the HTTP layer around [`deploy_hook_core`]: it receives the
//! GitHub webhook request, reconstructs the payload shape the pipeline
//! expects (body plus injected `__ce_headers`), runs the pipeline, and maps
//! the outcome to the service's fixed response table.
//!
//! The dependency flows HTTP → pipeline, never the reverse; nothing in the
//! core knows about axum.

use std::sync::Arc;

use deploy_hook_core::Config;

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use errors::ApiError;
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers.
///
/// Holds only the startup-validated configuration. The Code Engine session
/// client is deliberately not stored here: it is constructed per request so
/// no IAM token or entity tag outlives one invocation.
#[derive(Clone)]
pub struct AppState {
    /// Startup-validated process configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state around a validated configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
