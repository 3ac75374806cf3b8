//! Port interfaces for the session lifecycle
//!
//! These traits define the boundaries between the session state machine
//! and infrastructure implementations (HTTP, persistence, navigation).

use std::fmt;

use async_trait::async_trait;
use oidc_session_domain::{Claims, Result, TokenPair};

/// The persisted session record, exactly as stored
///
/// `user_info` is the serialized claims blob; the machine parses it on restore
/// so a corrupt blob can be detected and the record cleared.
#[derive(Clone, PartialEq, Eq)]
pub struct PersistedRecord {
    pub access_token: String,
    pub id_token: String,
    pub user_info: String,
}

impl PersistedRecord {
    /// Build a record from its three entries.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        id_token: impl Into<String>,
        user_info: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: id_token.into(),
            user_info: user_info.into(),
        }
    }

    /// True when every entry carries a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.id_token.is_empty() && !self.user_info.is_empty()
    }
}

impl fmt::Debug for PersistedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedRecord")
            .field("access_token_len", &self.access_token.len())
            .field("id_token_len", &self.id_token.len())
            .field("user_info", &self.user_info)
            .finish()
    }
}

/// Trait for persisting the session record across restarts
///
/// Implementations write and clear all three entries together. A failure is
/// reported as `SessionError::Storage`; a record that exists but cannot be
/// parsed is reported as `SessionError::CorruptRecord`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write the access token, identity token and claims blob
    async fn put(&self, record: &PersistedRecord) -> Result<()>;

    /// Read the record; `None` if any entry is missing
    async fn read(&self) -> Result<Option<PersistedRecord>>;

    /// Remove all three entries (idempotent)
    async fn clear(&self) -> Result<()>;
}

/// Trait for the identity provider's token and user-info endpoints
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code for an access and identity token
    async fn exchange_code(&self, code: &str) -> Result<TokenPair>;

    /// Resolve the identity claims belonging to an access token
    async fn fetch_claims(&self, access_token: &str) -> Result<Claims>;
}

/// Where the user agent should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the application (provider login or logout page)
    External(String),
    /// Same-origin path inside the application
    Internal(String),
}

impl Navigation {
    /// The URL or path being navigated to
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Internal(path) => path,
        }
    }
}

/// Trait for redirecting the user agent
pub trait Navigator: Send + Sync {
    /// Issue a navigation; an error means the redirect could not be started
    fn navigate(&self, navigation: Navigation) -> Result<()>;
}
