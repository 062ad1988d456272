//! Process configuration.
//!
//! All required settings are read exactly once at startup into an explicit
//! [`Config`] value that is passed into the handler at construction time.
//! Nothing on the request path touches the process environment, and a missing
//! variable fails the whole process before the server binds its socket.

use secrecy::SecretString;

use crate::errors::{Error, Result};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding the IBM Cloud platform API key.
pub const ENV_API_KEY: &str = "IBMCLOUD_API_KEY";
/// Environment variable holding the shared GitHub webhook secret.
pub const ENV_WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
/// Environment variable naming the target Code Engine application.
pub const ENV_APP: &str = "CE_APP";
/// Environment variable naming the Code Engine region (e.g. `us-south`).
pub const ENV_REGION: &str = "CE_REGION";
/// Environment variable holding the Code Engine project identifier.
pub const ENV_PROJECT_ID: &str = "CE_PROJECT_ID";
/// Environment variable naming the Container Registry namespace.
pub const ENV_REGISTRY_NAMESPACE: &str = "ICR_NAMESPACE";
/// Environment variable naming the Container Registry image.
pub const ENV_REGISTRY_IMAGE: &str = "ICR_IMAGE";

/// Validated process configuration.
///
/// Secrets are wrapped in [`SecretString`] so they are redacted from debug
/// output and only exposed at the point of use.
#[derive(Clone)]
pub struct Config {
    /// IBM Cloud API key used for the IAM token exchange.
    pub api_key: SecretString,

    /// Shared secret for webhook signature verification.
    pub webhook_secret: SecretString,

    /// Name of the Code Engine application to patch.
    pub app_name: String,

    /// Region identifier of the Code Engine project (e.g. `us-south`).
    pub region: String,

    /// Code Engine project identifier (GUID).
    pub project_id: String,

    /// Container Registry namespace holding the built images.
    pub registry_namespace: String,

    /// Container Registry image name (without namespace or tag).
    pub registry_image: String,
}

impl Config {
    /// Load the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] naming the first variable that
    /// is absent or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary lookup function.
    ///
    /// This is the seam used by tests; [`Config::from_env`] delegates here
    /// with a lookup over the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(Error::MissingConfiguration(name)),
            }
        };

        Ok(Self {
            api_key: SecretString::from(required(ENV_API_KEY)?),
            webhook_secret: SecretString::from(required(ENV_WEBHOOK_SECRET)?),
            app_name: required(ENV_APP)?,
            region: required(ENV_REGION)?,
            project_id: required(ENV_PROJECT_ID)?,
            registry_namespace: required(ENV_REGISTRY_NAMESPACE)?,
            registry_image: required(ENV_REGISTRY_IMAGE)?,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("app_name", &self.app_name)
            .field("region", &self.region)
            .field("project_id", &self.project_id)
            .field("registry_namespace", &self.registry_namespace)
            .field("registry_image", &self.registry_image)
            .finish()
    }
}
