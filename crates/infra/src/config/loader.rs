//! Configuration loader
//!
//! Loads the application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are missing, falls back to a config file
//! 3. Probes several paths for the file
//! 4. Supports JSON and TOML formats
//!
//! The result is validated before it is returned.
//!
//! ## Environment Variables
//! - `OIDC_PROVIDER_URL`: Identity provider base URL (required)
//! - `OIDC_CLIENT_ID`: Client identifier (required)
//! - `OIDC_CLIENT_SECRET`: Client secret (required)
//! - `OIDC_REDIRECT_URI`: Registered callback URL (required)
//! - `OIDC_SCOPES`: Space or comma separated scopes
//! - `OIDC_TIMEOUT_MS`: Deadline for provider calls
//! - `OIDC_TOKEN_TIMEOUT_MS`: Deadline for the token exchange
//! - `OIDC_VERIFY_STATE`: Check the callback `state` (true/false)
//! - `OIDC_STORE`: `memory`, `file` or `keychain`
//! - `OIDC_STORE_PATH`: Document path for the file store
//! - `OIDC_KEYCHAIN_SERVICE`: Service name for the keychain store
//! - `OIDC_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following names in the current working directory,
//! then next to the executable:
//! `oidc-session.toml`, `oidc-session.json`, `config.toml`, `config.json`.

use std::path::{Path, PathBuf};

use oidc_session_domain::constants::DEFAULT_KEYCHAIN_SERVICE;
use oidc_session_domain::{AppConfig, LogFormat, ProviderConfig, Result, SessionError, StoreConfig};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["oidc-session.toml", "oidc-session.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `SessionError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from the process environment
///
/// # Errors
/// Returns `SessionError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<AppConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source
///
/// # Arguments
/// * `lookup` - Returns the value of a variable, `None` if unset
///
/// # Errors
/// Returns `SessionError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_lookup<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            SessionError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let mut provider = ProviderConfig::new(
        required("OIDC_PROVIDER_URL")?,
        required("OIDC_CLIENT_ID")?,
        required("OIDC_CLIENT_SECRET")?,
        required("OIDC_REDIRECT_URI")?,
    );

    if let Some(scopes) = lookup("OIDC_SCOPES") {
        let scopes: Vec<String> = scopes
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if !scopes.is_empty() {
            provider.scopes = scopes;
        }
    }
    if let Some(ms) = parse_u64(&lookup, "OIDC_TIMEOUT_MS")? {
        provider.request_timeout_ms = ms;
    }
    if let Some(ms) = parse_u64(&lookup, "OIDC_TOKEN_TIMEOUT_MS")? {
        provider.token_request_timeout_ms = ms;
    }
    provider.verify_state = parse_bool(lookup("OIDC_VERIFY_STATE"), false);

    let store = match lookup("OIDC_STORE").map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "memory") => StoreConfig::Memory,
        Some("file") => StoreConfig::File { path: PathBuf::from(required("OIDC_STORE_PATH")?) },
        Some("keychain") => StoreConfig::Keychain {
            service: lookup("OIDC_KEYCHAIN_SERVICE")
                .unwrap_or_else(|| DEFAULT_KEYCHAIN_SERVICE.to_string()),
        },
        Some(other) => {
            return Err(SessionError::Config(format!("Unsupported session store: {other}")));
        }
    };

    let log_format = match lookup("OIDC_LOG_FORMAT") {
        Some(raw) => raw.parse::<LogFormat>().map_err(SessionError::Config)?,
        None => LogFormat::default(),
    };

    let config = AppConfig { provider, store, log_format };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `SessionError::Config` if the file is missing, unreadable, in an
/// unsupported format, or describes an invalid configuration.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SessionError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SessionError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SessionError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SessionError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SessionError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SessionError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SessionError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| SessionError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts `1`/`true`/`yes`/`on` (case-insensitive) as true.
fn parse_bool(raw: Option<String>, default: bool) -> bool {
    raw.map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("OIDC_PROVIDER_URL", "https://auth.example"),
        ("OIDC_CLIENT_ID", "web"),
        ("OIDC_CLIENT_SECRET", "s3cret"),
        ("OIDC_REDIRECT_URI", "https://app.example/oauth/callback"),
    ];

    #[test]
    fn test_parse_bool() {
        for raw in ["1", "true", "YES", " on "] {
            assert!(parse_bool(Some(raw.to_string()), false), "{raw}");
        }
        for raw in ["0", "false", "no", "off", "maybe"] {
            assert!(!parse_bool(Some(raw.to_string()), true), "{raw}");
        }
        assert!(parse_bool(None, true));
    }

    #[test]
    fn test_env_with_defaults() {
        let config = load_from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.provider.client_id, "web");
        assert_eq!(config.provider.scope_string(), "openid profile groups email");
        assert_eq!(config.provider.request_timeout_ms, 15_000);
        assert_eq!(config.provider.token_request_timeout_ms, 20_000);
        assert!(!config.provider.verify_state);
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("OIDC_SCOPES", "openid,email"),
            ("OIDC_TIMEOUT_MS", "500"),
            ("OIDC_VERIFY_STATE", "true"),
            ("OIDC_STORE", "file"),
            ("OIDC_STORE_PATH", "/tmp/session.json"),
            ("OIDC_LOG_FORMAT", "json"),
        ]);

        let config = load_from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.provider.scopes, vec!["openid", "email"]);
        assert_eq!(config.provider.request_timeout_ms, 500);
        assert!(config.provider.verify_state);
        assert_eq!(config.store, StoreConfig::File { path: PathBuf::from("/tmp/session.json") });
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_env_keychain_default_service() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("OIDC_STORE", "keychain"));

        let config = load_from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.store, StoreConfig::Keychain { service: "oidc-session".to_string() });
    }

    #[test]
    fn test_env_missing_var() {
        let err = load_from_lookup(lookup_from(&REQUIRED[..3])).unwrap_err();
        assert!(matches!(err, SessionError::Config(msg) if msg.contains("OIDC_REDIRECT_URI")));
    }

    #[test]
    fn test_env_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("OIDC_TOKEN_TIMEOUT_MS", "soon"));

        assert!(matches!(load_from_lookup(lookup_from(&pairs)), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_env_unknown_store() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("OIDC_STORE", "cookie"));

        assert!(matches!(load_from_lookup(lookup_from(&pairs)), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
log_format = "json"

[provider]
provider_url = "https://auth.example"
client_id = "web"
client_secret = "s3cret"
redirect_uri = "https://app.example/oauth/callback"
verify_state = true

[store]
kind = "keychain"
"#;

        let config = parse_config(toml_content, Path::new("oidc-session.toml")).unwrap();
        assert!(config.provider.verify_state);
        assert_eq!(config.provider.scopes.len(), 4);
        assert_eq!(config.store, StoreConfig::Keychain { service: "oidc-session".to_string() });
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("provider: {}", Path::new("config.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/oidc-session.json")));
        assert!(matches!(result, Err(SessionError::Config(_))));
    }
}
