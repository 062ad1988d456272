//! Tests for server configuration.

use deploy_hook_core::Config;
use serial_test::serial;

use super::*;

#[test]
fn test_default_config_binds_all_interfaces() {
    let config = ApiConfig::default();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
#[serial]
fn test_from_env_uses_defaults_when_unset() {
    std::env::remove_var("API_HOST");
    std::env::remove_var("API_PORT");

    let config = ApiConfig::from_env().unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    std::env::set_var("API_HOST", "127.0.0.1");
    std::env::set_var("API_PORT", "9090");

    let config = ApiConfig::from_env().unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);

    std::env::remove_var("API_HOST");
    std::env::remove_var("API_PORT");
}

#[test]
#[serial]
fn test_from_env_rejects_invalid_port() {
    std::env::set_var("API_PORT", "not-a-port");

    assert!(ApiConfig::from_env().is_err());

    std::env::remove_var("API_PORT");
}

#[test]
fn test_server_builds_router() {
    let config = Config::from_lookup(|name| {
        let value = match name {
            deploy_hook_core::config::ENV_API_KEY => "test-api-key",
            deploy_hook_core::config::ENV_WEBHOOK_SECRET => "testsecret",
            deploy_hook_core::config::ENV_APP => "my-app",
            deploy_hook_core::config::ENV_REGION => "us-south",
            deploy_hook_core::config::ENV_PROJECT_ID => "project-guid",
            deploy_hook_core::config::ENV_REGISTRY_NAMESPACE => "my-namespace",
            deploy_hook_core::config::ENV_REGISTRY_IMAGE => "my-image",
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap();

    let server = ApiServer::new(ApiConfig::default(), AppState::new(config));
    let _router = server.router();
}
