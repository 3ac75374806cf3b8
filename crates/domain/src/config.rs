//! Configuration management
//!
//! [`ProviderConfig`] describes the identity provider and this client's
//! registration with it. [`AppConfig`] adds the choice of session store and
//! log format for the binary.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    AUTHORIZE_PATH, DEFAULT_HOME_PATH, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOGIN_PATH,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SCOPES, LOGOUT_PATH, TOKEN_PATH, TOKEN_REQUEST_TIMEOUT_MS,
    USERINFO_PATH,
};
use crate::errors::{Result, SessionError};
use crate::impl_label_conversions;

/// Identity-provider configuration
///
/// Endpoints are derived from `provider_url` using the provider's fixed path
/// layout (see [`crate::constants`]).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the identity provider (e.g., "https://auth.example.com")
    pub provider_url: String,

    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret, sent via HTTP Basic on the token exchange
    #[serde(skip_serializing)]
    pub client_secret: String,

    /// Redirect URI registered with the provider
    pub redirect_uri: String,

    /// Scopes to request
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Deadline for user-info and other provider calls, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Deadline for the token exchange, in milliseconds
    #[serde(default = "default_token_request_timeout_ms")]
    pub token_request_timeout_ms: u64,

    /// Same-origin path navigated to after login or a duplicate callback
    #[serde(default = "default_home_path")]
    pub home_path: String,

    /// Same-origin path of the login view
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Require the callback `state` to match the one sent on login
    #[serde(default)]
    pub verify_state: bool,
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(ToString::to_string).collect()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_token_request_timeout_ms() -> u64 {
    TOKEN_REQUEST_TIMEOUT_MS
}

fn default_home_path() -> String {
    DEFAULT_HOME_PATH.to_string()
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

impl ProviderConfig {
    /// Create a configuration with default scopes, timeouts and routes.
    #[must_use]
    pub fn new(
        provider_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            provider_url: provider_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: default_scopes(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            token_request_timeout_ms: TOKEN_REQUEST_TIMEOUT_MS,
            home_path: default_home_path(),
            login_path: default_login_path(),
            verify_state: false,
        }
    }

    #[must_use]
    pub fn with_verify_state(mut self, verify_state: bool) -> Self {
        self.verify_state = verify_state;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, request: Duration, token_request: Duration) -> Self {
        self.request_timeout_ms = duration_ms(request);
        self.token_request_timeout_ms = duration_ms(token_request);
        self
    }

    fn base(&self) -> &str {
        self.provider_url.trim_end_matches('/')
    }

    /// Get the authorization endpoint
    #[must_use]
    pub fn authorization_endpoint(&self) -> String {
        format!("{}{AUTHORIZE_PATH}", self.base())
    }

    /// Get the token endpoint
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}{TOKEN_PATH}", self.base())
    }

    /// Get the user-info endpoint
    #[must_use]
    pub fn userinfo_endpoint(&self) -> String {
        format!("{}{USERINFO_PATH}", self.base())
    }

    /// Get the provider logout URL
    #[must_use]
    pub fn logout_url(&self) -> String {
        format!("{}{LOGOUT_PATH}", self.base())
    }

    /// Get scopes as space-separated string
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn token_request_timeout(&self) -> Duration {
        Duration::from_millis(self.token_request_timeout_ms)
    }

    /// Check that the configuration can drive a login.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the client credentials are empty,
    /// a URL does not parse, no scope is configured or a timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(SessionError::Config("client_id must not be empty".to_string()));
        }
        if self.client_secret.is_empty() {
            return Err(SessionError::Config("client_secret must not be empty".to_string()));
        }

        for (field, value) in
            [("provider_url", &self.provider_url), ("redirect_uri", &self.redirect_uri)]
        {
            Url::parse(value).map_err(|e| {
                SessionError::Config(format!("{field} is not a valid URL ({value}): {e}"))
            })?;
        }

        if self.scopes.is_empty() {
            return Err(SessionError::Config("at least one scope is required".to_string()));
        }
        if self.request_timeout_ms == 0 || self.token_request_timeout_ms == 0 {
            return Err(SessionError::Config("timeouts must be greater than zero".to_string()));
        }

        Ok(())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider_url", &self.provider_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("token_request_timeout_ms", &self.token_request_timeout_ms)
            .field("home_path", &self.home_path)
            .field("login_path", &self.login_path)
            .field("verify_state", &self.verify_state)
            .finish()
    }
}

/// Where the persisted session record lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-process only; the session is lost on exit
    #[default]
    Memory,
    /// A single JSON document on disk
    File { path: PathBuf },
    /// Platform keychain entries under a service name
    Keychain {
        #[serde(default = "default_keychain_service")]
        service: String,
    },
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

impl StoreConfig {
    /// Stable label of the store kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File { .. } => "file",
            Self::Keychain { .. } => "keychain",
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_label_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    #[must_use]
    pub fn new(provider: ProviderConfig) -> Self {
        Self { provider, store: StoreConfig::default(), log_format: LogFormat::default() }
    }

    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Validate the provider section and the store selection.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] on the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        match &self.store {
            StoreConfig::File { path } if path.as_os_str().is_empty() => {
                Err(SessionError::Config("file store requires a path".to_string()))
            }
            StoreConfig::Keychain { service } if service.trim().is_empty() => {
                Err(SessionError::Config("keychain store requires a service name".to_string()))
            }
            _ => Ok(()),
        }
    }
}
