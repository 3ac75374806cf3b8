//! Access decisions for protected and login views

use oidc_session_domain::AuthSnapshot;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating a view against the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session resolution is in progress; render a spinner
    Loading,
    /// Render the view
    Allow,
    /// Send the user to the login view
    RedirectToLogin,
    /// Send the user to the home view
    RedirectHome,
}

impl GuardDecision {
    /// Decision for a view that requires a signed-in user.
    #[must_use]
    pub fn for_protected_view(snapshot: &AuthSnapshot) -> Self {
        if snapshot.is_loading {
            Self::Loading
        } else if snapshot.is_authenticated() {
            Self::Allow
        } else {
            Self::RedirectToLogin
        }
    }

    /// Decision for the login view: a signed-in user is sent home.
    #[must_use]
    pub fn for_login_view(snapshot: &AuthSnapshot) -> Self {
        if snapshot.is_loading {
            Self::Loading
        } else if snapshot.is_authenticated() {
            Self::RedirectHome
        } else {
            Self::Allow
        }
    }
}

/// Maps guard decisions onto the application's routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
    home_path: String,
}

impl RouteGuard {
    #[must_use]
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self { login_path: login_path.into(), home_path: home_path.into() }
    }

    /// Evaluate a protected view.
    #[must_use]
    pub fn evaluate(&self, snapshot: &AuthSnapshot) -> GuardDecision {
        GuardDecision::for_protected_view(snapshot)
    }

    /// Path to redirect to for `decision`, if it is a redirect.
    #[must_use]
    pub fn redirect_target(&self, decision: GuardDecision) -> Option<&str> {
        match decision {
            GuardDecision::RedirectToLogin => Some(&self.login_path),
            GuardDecision::RedirectHome => Some(&self.home_path),
            GuardDecision::Loading | GuardDecision::Allow => None,
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(
            oidc_session_domain::constants::DEFAULT_LOGIN_PATH,
            oidc_session_domain::constants::DEFAULT_HOME_PATH,
        )
    }
}

#[cfg(test)]
mod tests {
    use oidc_session_domain::{Claims, Session, SessionState, TokenPair};

    use super::*;

    fn signed_in() -> AuthSnapshot {
        let session = Session::new(TokenPair::new("a", "i"), Claims::new("s"));
        AuthSnapshot::from_state(SessionState::Authenticated, Some(session))
    }

    fn signed_out() -> AuthSnapshot {
        AuthSnapshot::from_state(SessionState::Unauthenticated { error: None }, None)
    }

    #[test]
    fn test_protected_view_decisions() {
        let guard = RouteGuard::default();
        assert_eq!(guard.evaluate(&AuthSnapshot::initial()), GuardDecision::Loading);
        assert_eq!(guard.evaluate(&signed_in()), GuardDecision::Allow);

        let decision = guard.evaluate(&signed_out());
        assert_eq!(decision, GuardDecision::RedirectToLogin);
        assert_eq!(guard.redirect_target(decision), Some("/login"));
    }

    #[test]
    fn test_login_view_decisions() {
        assert_eq!(GuardDecision::for_login_view(&signed_in()), GuardDecision::RedirectHome);
        assert_eq!(GuardDecision::for_login_view(&signed_out()), GuardDecision::Allow);
        assert_eq!(
            RouteGuard::new("/anmelden", "/start").redirect_target(GuardDecision::RedirectHome),
            Some("/start")
        );
    }
}
