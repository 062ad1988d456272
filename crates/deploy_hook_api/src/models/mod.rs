//! HTTP response models.

pub mod response;

pub use response::{ErrorBody, HealthResponse, WebhookResponse};
