//! Tests for configuration loading.

use std::collections::HashMap;

use secrecy::ExposeSecret;
use serial_test::serial;

use super::*;

fn full_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (ENV_API_KEY, "test-api-key"),
        (ENV_WEBHOOK_SECRET, "testsecret"),
        (ENV_APP, "my-app"),
        (ENV_REGION, "us-south"),
        (ENV_PROJECT_ID, "4e49b3c0-4f6c-4c3d-8ca3-4b6b3e6c8c5f"),
        (ENV_REGISTRY_NAMESPACE, "my-namespace"),
        (ENV_REGISTRY_IMAGE, "my-image"),
    ])
}

fn lookup_in(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).map(|v| v.to_string())
}

#[test]
fn test_from_lookup_with_all_variables() {
    let config = Config::from_lookup(lookup_in(full_vars())).unwrap();

    assert_eq!(config.api_key.expose_secret(), "test-api-key");
    assert_eq!(config.webhook_secret.expose_secret(), "testsecret");
    assert_eq!(config.app_name, "my-app");
    assert_eq!(config.region, "us-south");
    assert_eq!(config.project_id, "4e49b3c0-4f6c-4c3d-8ca3-4b6b3e6c8c5f");
    assert_eq!(config.registry_namespace, "my-namespace");
    assert_eq!(config.registry_image, "my-image");
}

#[test]
fn test_each_missing_variable_is_fatal() {
    for missing in [
        ENV_API_KEY,
        ENV_WEBHOOK_SECRET,
        ENV_APP,
        ENV_REGION,
        ENV_PROJECT_ID,
        ENV_REGISTRY_NAMESPACE,
        ENV_REGISTRY_IMAGE,
    ] {
        let mut vars = full_vars();
        vars.remove(missing);

        let err = Config::from_lookup(lookup_in(vars)).unwrap_err();
        match err {
            Error::MissingConfiguration(name) => assert_eq!(name, missing),
            other => panic!("expected MissingConfiguration, got {other:?}"),
        }
    }
}

#[test]
fn test_empty_value_is_treated_as_missing() {
    let mut vars = full_vars();
    vars.insert(ENV_WEBHOOK_SECRET, "");

    let err = Config::from_lookup(lookup_in(vars)).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingConfiguration(ENV_WEBHOOK_SECRET)
    ));
}

#[test]
fn test_debug_output_redacts_secrets() {
    let config = Config::from_lookup(lookup_in(full_vars())).unwrap();
    let debug = format!("{config:?}");

    assert!(!debug.contains("test-api-key"));
    assert!(!debug.contains("testsecret"));
    assert!(debug.contains("[REDACTED]"));
    assert!(debug.contains("my-app"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    for (name, value) in full_vars() {
        std::env::set_var(name, value);
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.app_name, "my-app");

    std::env::remove_var(ENV_APP);
    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, Error::MissingConfiguration(ENV_APP)));

    for (name, _) in full_vars() {
        std::env::remove_var(name);
    }
}
