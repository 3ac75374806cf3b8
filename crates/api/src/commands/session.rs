//! Session commands
//!
//! Each command returns a serializable response so any front end (the CLI,
//! a webview bridge) can render it.

use oidc_session_core::{CallbackParams, GuardDecision, Navigation};
use oidc_session_domain::{Result as DomainResult, Session};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// The signed-in user as shown in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub subject: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub groups: Vec<String>,
    pub initials: String,
}

impl From<&Session> for UserSummary {
    fn from(session: &Session) -> Self {
        Self {
            subject: session.subject().to_string(),
            display_name: session.display_name().map(ToString::to_string),
            email: session.email().map(ToString::to_string),
            groups: session.groups().to_vec(),
            initials: session.claims.initials(),
        }
    }
}

/// Current session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub state: &'static str,
    pub authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub user: Option<UserSummary>,
    /// Decision for a protected view
    pub guard: GuardDecision,
    /// Where a protected view would redirect to, if anywhere
    pub redirect: Option<String>,
}

/// A navigation issued by the session, in wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum NavigationTarget {
    External(String),
    Internal(String),
}

impl From<Navigation> for NavigationTarget {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::External(url) => Self::External(url),
            Navigation::Internal(path) => Self::Internal(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub authorization_url: String,
}

/// Outcome of a command that moves the user agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationResponse {
    pub status: SessionStatus,
    pub navigations: Vec<NavigationTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

fn current_status(ctx: &AppContext) -> SessionStatus {
    let snapshot = ctx.session.snapshot();
    let guard = ctx.guard.evaluate(&snapshot);

    SessionStatus {
        state: snapshot.state.label(),
        authenticated: snapshot.is_authenticated(),
        is_loading: snapshot.is_loading,
        error: snapshot.error.clone(),
        user: snapshot.user.as_ref().map(UserSummary::from),
        guard,
        redirect: ctx.guard.redirect_target(guard).map(ToString::to_string),
    }
}

fn navigation_response(ctx: &AppContext) -> NavigationResponse {
    NavigationResponse {
        status: current_status(ctx),
        navigations: ctx.drain_navigations().into_iter().map(NavigationTarget::from).collect(),
    }
}

/// Report the current session
pub async fn status(ctx: &AppContext) -> DomainResult<SessionStatus> {
    execute_logged("session::status", || async { Ok(current_status(ctx)) }).await
}

/// Build the authorization URL and start the login redirect
///
/// # Errors
/// Returns `SessionError::Config` if the URL cannot be built.
pub async fn login(ctx: &AppContext) -> DomainResult<LoginResponse> {
    execute_logged("session::login", || async {
        let authorization_url = ctx.session.login()?;
        ctx.drain_navigations();
        Ok(LoginResponse { authorization_url })
    })
    .await
}

/// Complete a login from the URL the provider redirected to
///
/// # Errors
/// Returns the redirect check or exchange failure. The failure is also
/// recorded in the session status.
pub async fn callback(ctx: &AppContext, redirect_url: &str) -> DomainResult<NavigationResponse> {
    execute_logged("session::callback", || async {
        let params = CallbackParams::from_url(redirect_url)?;
        ctx.session.handle_redirect(&params).await?;
        Ok(navigation_response(ctx))
    })
    .await
}

/// Log out at the provider
pub async fn logout(ctx: &AppContext) -> DomainResult<NavigationResponse> {
    execute_logged("session::logout", || async {
        ctx.session.logout().await;
        Ok(navigation_response(ctx))
    })
    .await
}

/// Log out without contacting the provider
pub async fn local_logout(ctx: &AppContext) -> DomainResult<NavigationResponse> {
    execute_logged("session::local_logout", || async {
        ctx.session.local_logout().await;
        Ok(navigation_response(ctx))
    })
    .await
}

/// Current bearer token, if any
pub async fn token(ctx: &AppContext) -> DomainResult<TokenResponse> {
    execute_logged("session::token", || async {
        Ok(TokenResponse { access_token: ctx.session.access_token().await })
    })
    .await
}
