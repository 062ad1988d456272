//! Tests for the error taxonomy.

use super::*;

#[test]
fn test_missing_configuration_names_the_variable() {
    let err = Error::MissingConfiguration("WEBHOOK_SECRET");
    assert_eq!(
        err.to_string(),
        "WEBHOOK_SECRET environment variable not found"
    );
}

#[test]
fn test_validation_message_is_passed_through() {
    let err = Error::Validation("Missing params.workflow_run".to_string());
    assert_eq!(err.to_string(), "Missing params.workflow_run");
}

#[test]
fn test_signature_mismatch_leaks_no_detail() {
    // The display string is the full client-visible response body; it must
    // never contain a digest.
    let err = Error::SignatureMismatch;
    assert_eq!(err.to_string(), "Request signatures didn't match!");
}

#[test]
fn test_missing_image_tag_message() {
    assert_eq!(Error::MissingImageTag.to_string(), "Missing image tag");
}

#[test]
fn test_upstream_surfaces_message_verbatim() {
    let err = Error::Upstream("Code Engine API returned 412: etag mismatch".to_string());
    assert_eq!(
        err.to_string(),
        "Code Engine API returned 412: etag mismatch"
    );
}
