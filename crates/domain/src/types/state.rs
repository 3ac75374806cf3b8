//! Session state-machine states and the snapshot published to observers

use serde::{Deserialize, Serialize};

use super::session::Session;

/// Lifecycle state of the session machine
///
/// `Uninitialized → Restoring → {Authenticated, Unauthenticated}`; a callback
/// moves through `Exchanging` to `Authenticated` or `Unauthenticated` with an
/// error. Login itself leaves the process via an external redirect and has no
/// state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Uninitialized,
    Restoring,
    Exchanging,
    Authenticated,
    Unauthenticated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl SessionState {
    /// Whether session resolution is still in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Restoring | Self::Exchanging)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Error recorded by the last failed callback, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Restoring => "restoring",
            Self::Exchanging => "exchanging",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated { .. } => "unauthenticated",
        }
    }
}

/// Read-only projection of the machine, published on every transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<Session>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub state: SessionState,
}

impl AuthSnapshot {
    /// Snapshot before `restore` has run: loading, no user.
    #[must_use]
    pub fn initial() -> Self {
        Self::from_state(SessionState::Uninitialized, None)
    }

    /// Derive the loading flag and error from the state.
    #[must_use]
    pub fn from_state(state: SessionState, user: Option<Session>) -> Self {
        Self {
            user,
            is_loading: state.is_loading(),
            error: state.error().map(ToString::to_string),
            state,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.as_ref().is_some_and(Session::is_authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Claims, TokenPair};

    #[test]
    fn loading_states() {
        assert!(SessionState::Uninitialized.is_loading());
        assert!(SessionState::Exchanging.is_loading());
        assert!(!SessionState::Authenticated.is_loading());
        assert!(!SessionState::Unauthenticated { error: None }.is_loading());
    }

    #[test]
    fn snapshot_carries_state_error() {
        let state = SessionState::Unauthenticated { error: Some("boom".to_string()) };
        let snapshot = AuthSnapshot::from_state(state, None);
        assert_eq!(snapshot.error.as_deref(), Some("boom"));
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_authenticated());
    }

    #[test]
    fn authenticated_snapshot() {
        let session = Session::new(TokenPair::new("a", "i"), Claims::new("s"));
        let snapshot = AuthSnapshot::from_state(SessionState::Authenticated, Some(session));
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.state.label(), "authenticated");
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(SessionState::Unauthenticated { error: None }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "unauthenticated" }));
    }
}
