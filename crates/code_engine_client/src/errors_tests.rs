//! Tests for client error formatting.

use super::*;

#[test]
fn test_api_error_includes_status_and_message() {
    let err = Error::Api {
        status: 412,
        message: "the entity tag does not match".to_string(),
    };

    assert_eq!(
        err.to_string(),
        "Code Engine API returned 412: the entity tag does not match"
    );
}

#[test]
fn test_auth_error_names_iam() {
    let err = Error::Auth("Provided API key could not be found".to_string());

    assert_eq!(
        err.to_string(),
        "Failed to authenticate with IAM: Provided API key could not be found"
    );
}

#[test]
fn test_endpoint_error_wraps_url_parse_failure() {
    let parse_err = url::Url::parse("not a url").unwrap_err();
    let err = Error::from(parse_err);

    assert!(err.to_string().starts_with("Invalid Code Engine endpoint:"));
}
