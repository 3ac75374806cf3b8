//! Error types used throughout the session client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for session operations
///
/// Display strings are the messages shown to the user by the callback and
/// login views, so they stay in the application's UI language.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SessionError {
    /// The provider call did not complete before its deadline.
    #[error("Zeitüberschreitung bei der Anfrage an {url}")]
    RequestTimeout { url: String },

    /// Any other transport failure, carrying the underlying message.
    #[error("Netzwerkfehler: {0}")]
    Transport(String),

    /// The token endpoint rejected the code or the client credentials.
    #[error("Anmeldung fehlgeschlagen: {0}")]
    TokenExchangeFailed(String),

    /// The token endpoint answered successfully without both tokens.
    #[error("Ungültige Antwort vom Authentifizierungsserver: Fehlende Token")]
    InvalidTokenResponse,

    /// The user-info endpoint rejected the access token.
    #[error("Benutzerinformationen konnten nicht abgerufen werden: {0}")]
    UserInfoFailed(String),

    /// Neither JSON nor compact-token decoding produced a claims object.
    #[error("Konnte Benutzerinformationen nicht parsen")]
    ClaimsDecodeFailed(String),

    /// The provider redirected back with an `error` parameter.
    #[error("{0}")]
    ProviderRejected(String),

    /// The redirect carried no authorization code.
    #[error("Kein Autorisierungscode erhalten")]
    MissingAuthorizationCode,

    /// The returned `state` does not match the one sent with the login redirect.
    #[error("Ungültiger Anmeldestatus (state)")]
    StateMismatch,

    #[error("Sitzungsspeicher-Fehler: {0}")]
    Storage(String),

    /// The persisted record exists but cannot be parsed; it should be discarded.
    #[error("Gespeicherte Sitzung ist beschädigt: {0}")]
    CorruptRecord(String),

    #[error("Konfigurationsfehler: {0}")]
    Config(String),
}

impl SessionError {
    /// Whether the message should be shown verbatim to the user.
    ///
    /// Provider rejections carry a message the user can act on; everything
    /// else is surfaced as a generic failure.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::TokenExchangeFailed(_)
                | Self::UserInfoFailed(_)
                | Self::ProviderRejected(_)
                | Self::MissingAuthorizationCode
        )
    }

    /// Stable label suitable for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::RequestTimeout { .. } => "request_timeout",
            Self::Transport(_) => "transport",
            Self::TokenExchangeFailed(_) => "token_exchange_failed",
            Self::InvalidTokenResponse => "invalid_token_response",
            Self::UserInfoFailed(_) => "user_info_failed",
            Self::ClaimsDecodeFailed(_) => "claims_decode_failed",
            Self::ProviderRejected(_) => "provider_rejected",
            Self::MissingAuthorizationCode => "missing_authorization_code",
            Self::StateMismatch => "state_mismatch",
            Self::Storage(_) => "storage",
            Self::CorruptRecord(_) => "corrupt_record",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
