//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use oidc_session_domain::{LogFormat, SessionError, StoreConfig};
use oidc_session_infra::config;
use tempfile::NamedTempFile;

fn write_config(content: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "provider": {
            "provider_url": "https://auth.example/",
            "client_id": "web",
            "client_secret": "s3cret",
            "redirect_uri": "https://app.example/oauth/callback",
            "request_timeout_ms": 5000
        },
        "store": { "kind": "file", "path": "/tmp/oidc-session/session.json" }
    }"#;
    let path = write_config(json_content, "json");

    let config = config::load_from_file(Some(path.clone())).expect("config loads");

    // Verify provider configuration
    assert_eq!(config.provider.client_id, "web");
    assert_eq!(config.provider.token_endpoint(), "https://auth.example/api/oidc/token");
    assert_eq!(config.provider.request_timeout_ms, 5000);
    assert_eq!(config.provider.token_request_timeout_ms, 20_000);
    assert_eq!(config.provider.home_path, "/");

    // Verify store and logging
    assert_eq!(config.store, StoreConfig::File { path: "/tmp/oidc-session/session.json".into() });
    assert_eq!(config.log_format, LogFormat::Pretty);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[provider]
provider_url = "https://auth.example"
client_id = "web"
client_secret = "s3cret"
redirect_uri = "https://app.example/oauth/callback"
scopes = ["openid", "email"]

[store]
kind = "keychain"
service = "com.example.portal"
"#;
    let path = write_config(toml_content, "toml");

    let config = config::load_from_file(Some(path.clone())).expect("config loads");

    assert_eq!(config.provider.scope_string(), "openid email");
    assert_eq!(config.store, StoreConfig::Keychain { service: "com.example.portal".to_string() });

    std::fs::remove_file(path).ok();
}

#[test]
fn test_file_config_is_validated() {
    let json_content = r#"{
        "provider": {
            "provider_url": "not a url",
            "client_id": "web",
            "client_secret": "s3cret",
            "redirect_uri": "https://app.example/oauth/callback"
        }
    }"#;
    let path = write_config(json_content, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(SessionError::Config(_))), "got {result:?}");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_toml_is_config_error() {
    let path = write_config("[provider\nclient_id = ", "toml");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(SessionError::Config(msg)) if msg.contains("TOML")));

    std::fs::remove_file(path).ok();
}
