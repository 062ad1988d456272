//! HTTP request handlers.
//!
//! The webhook handler reconstructs the payload shape the pipeline expects
//! (the parsed JSON body with the request headers injected under
//! `__ce_headers`), then runs the pipeline and maps the result through the
//! fixed response table.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use code_engine_client::CodeEngineClient;
use deploy_hook_core::{process_event, Error, Result as PipelineResult, UpdateOutcome, WebhookPayload};

use crate::{
    errors::ApiError,
    models::response::{HealthResponse, WebhookResponse},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// POST /webhook
///
/// Receive one GitHub Actions `workflow_run` completion event and patch the
/// configured Code Engine application to the freshly built image tag.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload = match parse_payload(&headers, &body) {
        Ok(payload) => payload,
        Err(err) => return ApiError(err).into_response(),
    };

    // The session client is scoped to this invocation; nothing about it is
    // cached across requests.
    let client = match CodeEngineClient::new(state.config.api_key.clone(), &state.config.region) {
        Ok(client) => client,
        Err(err) => return ApiError(Error::Upstream(err.to_string())).into_response(),
    };

    respond(process_event(&payload, &state.config, &client).await)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Parse the raw body and inject the request headers under the reserved
/// metadata key the pipeline strips before verification.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> PipelineResult<WebhookPayload> {
    let fields: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|_| Error::Validation("Invalid JSON payload".to_string()))?;

    let header_pairs = headers.iter().filter_map(|(name, value)| {
        value
            .to_str()
            .ok()
            .map(|v| (name.as_str().to_string(), v.to_string()))
    });

    Ok(WebhookPayload::from_body_and_headers(fields, header_pairs))
}

/// Map the pipeline result to the outbound response.
fn respond(result: PipelineResult<UpdateOutcome>) -> Response {
    match result {
        Ok(outcome) => (StatusCode::OK, Json(WebhookResponse::from(outcome))).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}
