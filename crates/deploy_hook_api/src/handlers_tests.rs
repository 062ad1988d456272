//! Tests for handler helpers.

use axum::http::{HeaderMap, HeaderValue};
use http_body_util::BodyExt;

use super::*;

#[test]
fn test_parse_payload_rejects_invalid_json() {
    let headers = HeaderMap::new();

    let err = parse_payload(&headers, b"not json").unwrap_err();
    match err {
        Error::Validation(message) => assert_eq!(message, "Invalid JSON payload"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_parse_payload_rejects_non_object_json() {
    let headers = HeaderMap::new();

    assert!(matches!(
        parse_payload(&headers, b"[1, 2, 3]").unwrap_err(),
        Error::Validation(_)
    ));
}

#[test]
fn test_parse_payload_injects_request_headers() {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-hub-signature-256",
        HeaderValue::from_static("sha256=abcd"),
    );

    let payload = parse_payload(
        &headers,
        br#"{"workflow_run":{"head_sha":"abcdef1234567890"}}"#,
    )
    .unwrap();

    assert_eq!(payload.signature_header(), Some("sha256=abcd"));
    assert!(payload.validate().is_ok());
    assert_eq!(payload.image_tag().unwrap().as_str(), "abcdef12");
}

#[tokio::test]
async fn test_respond_success_produces_envelope() {
    let response = respond(Ok(UpdateOutcome {
        latest_ready_revision: Some("my-app-00005".to_string()),
    }));

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["latest_ready_revision"], "my-app-00005");
    assert_eq!(json["body"], "App updated successfully");
}

#[tokio::test]
async fn test_respond_upstream_failure_produces_error_envelope() {
    let response = respond(Err(Error::Upstream("IAM exchange failed".to_string())));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "IAM exchange failed");
}
