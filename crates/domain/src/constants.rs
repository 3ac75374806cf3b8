//! Protocol constants
//!
//! Centralized location for the endpoint layout of the identity provider,
//! the persisted-record keys and the request deadlines.

use std::time::Duration;

// Provider endpoint paths (appended to the provider base URL)
pub const AUTHORIZE_PATH: &str = "/api/oidc/authorize";
pub const TOKEN_PATH: &str = "/api/oidc/token";
pub const USERINFO_PATH: &str = "/api/oidc/userinfo";
pub const LOGOUT_PATH: &str = "/logout";

/// Scopes requested on every authorization redirect.
pub const DEFAULT_SCOPES: [&str; 4] = ["openid", "profile", "groups", "email"];

// Request deadlines
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;
pub const TOKEN_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Default deadline for provider calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS);

/// Longer deadline granted to the token exchange.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_millis(TOKEN_REQUEST_TIMEOUT_MS);

// Persisted record keys; always written and cleared together
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "accessToken";
pub const STORAGE_KEY_ID_TOKEN: &str = "idToken";
pub const STORAGE_KEY_USER_INFO: &str = "userInfo";

/// All persisted keys, in write order.
pub const STORAGE_KEYS: [&str; 3] =
    [STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_ID_TOKEN, STORAGE_KEY_USER_INFO];

// Placeholder identity used when the provider returns an empty claims object
pub const UNKNOWN_SUBJECT: &str = "unknown";
pub const UNKNOWN_DISPLAY_NAME: &str = "Unbekannter Benutzer";

// Application routes
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const CALLBACK_PATH: &str = "/oauth/callback";

// Default keychain service for the platform store
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "oidc-session";
