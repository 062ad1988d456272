//! Client for the IBM Cloud Code Engine v2 API.
//!
//! Exchanges a long-lived platform API key for an IAM bearer token, then
//! performs the two application operations the webhook needs: fetching an app
//! record and submitting a conditional patch keyed on its entity tag.
//!
//! The client is a scoped resource: it is constructed once per invocation and
//! exchanges the API key at most once over its lifetime. Nothing is cached
//! across invocations.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, IF_MATCH};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use url::Url;

use deploy_hook_core::{region_prefix, AppPatch, AppSnapshot, AppUpdated, ApplicationApi};

pub mod errors;
pub use errors::Error;

pub mod models;
use models::{error_message, IamTokenResponse};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// IAM endpoint used to exchange the API key for a bearer token.
const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/";

/// IAM grant type for API-key exchanges.
const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Content type the Code Engine API requires for partial updates.
const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// A session client for one Code Engine region.
pub struct CodeEngineClient {
    http: reqwest::Client,
    service_url: Url,
    iam_url: Url,
    api_key: SecretString,
    token: OnceCell<String>,
}

impl CodeEngineClient {
    /// Create a client bound to the region's service endpoint.
    ///
    /// The endpoint is `https://api.<region-prefix>.codeengine.cloud.ibm.com/v2`,
    /// where the prefix is the region without its availability-zone suffix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] when the region produces an unparsable URL.
    pub fn new(api_key: SecretString, region: &str) -> Result<Self, Error> {
        let service_url = Url::parse(&format!(
            "https://api.{}.codeengine.cloud.ibm.com/v2/",
            region_prefix(region)
        ))?;
        let iam_url = Url::parse(DEFAULT_IAM_URL)?;
        Ok(Self::with_endpoints(api_key, service_url, iam_url))
    }

    /// Create a client against explicit service and IAM endpoints.
    ///
    /// `service_url` must end with a trailing slash (e.g. `.../v2/`). Used by
    /// tests to point the client at a mock server.
    pub fn with_endpoints(api_key: SecretString, service_url: Url, iam_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_url,
            iam_url,
            api_key,
            token: OnceCell::new(),
        }
    }

    /// The service endpoint this client is bound to.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// Exchange the API key for a bearer token, once per client lifetime.
    async fn bearer_token(&self) -> Result<&str, Error> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let url = self.iam_url.join("identity/token")?;
                debug!(%url, "Exchanging API key for IAM token");

                let response = self
                    .http
                    .post(url)
                    .form(&[
                        ("grant_type", API_KEY_GRANT_TYPE),
                        ("apikey", self.api_key.expose_secret().as_str()),
                    ])
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Auth(error_message(&body)));
                }

                let token: IamTokenResponse = response.json().await?;
                Ok(token.access_token)
            })
            .await?;
        Ok(token)
    }

    fn app_url(&self, project_id: &str, name: &str) -> Result<Url, Error> {
        Ok(self
            .service_url
            .join(&format!("projects/{project_id}/apps/{name}"))?)
    }

    /// Fetch the current record of an application.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for non-success statuses, [`Error::Auth`] when
    /// the IAM exchange fails, and [`Error::Request`] for transport failures.
    #[instrument(skip(self), fields(project_id = %project_id, name = %name))]
    pub async fn fetch_app(&self, project_id: &str, name: &str) -> Result<AppSnapshot, Error> {
        let token = self.bearer_token().await?;
        let response = self
            .http
            .get(self.app_url(project_id, name)?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response.json().await?)
    }

    /// Patch an application, conditioned on the given entity tag.
    ///
    /// Sends a merge patch with `If-Match: <entity_tag>`; the platform
    /// rejects the write with a 412 when the tag is stale.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CodeEngineClient::fetch_app`]; a lost conditional
    /// update surfaces as [`Error::Api`] with status 412.
    #[instrument(skip(self, patch), fields(project_id = %project_id, name = %name, if_match = %if_match))]
    pub async fn patch_app(
        &self,
        project_id: &str,
        name: &str,
        if_match: &str,
        patch: &AppPatch,
    ) -> Result<AppUpdated, Error> {
        let token = self.bearer_token().await?;
        let body = serde_json::to_string(patch)?;

        let response = self
            .http
            .patch(self.app_url(project_id, name)?)
            .bearer_auth(token)
            .header(IF_MATCH, if_match)
            .header(CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for CodeEngineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeEngineClient")
            .field("service_url", &self.service_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl ApplicationApi for CodeEngineClient {
    async fn get_app(
        &self,
        project_id: &str,
        name: &str,
    ) -> deploy_hook_core::Result<AppSnapshot> {
        self.fetch_app(project_id, name).await.map_err(into_upstream)
    }

    async fn update_app(
        &self,
        project_id: &str,
        name: &str,
        if_match: &str,
        patch: &AppPatch,
    ) -> deploy_hook_core::Result<AppUpdated> {
        self.patch_app(project_id, name, if_match, patch)
            .await
            .map_err(into_upstream)
    }
}

/// Collapse any client error into the pipeline's upstream category.
fn into_upstream(err: Error) -> deploy_hook_core::Error {
    deploy_hook_core::Error::Upstream(err.to_string())
}
