//! Read-only session surface for the rest of the application

use async_trait::async_trait;
use oidc_session_domain::{Result, Session};

use super::machine::SessionMachine;

/// What views and request helpers need from the session
#[async_trait]
pub trait SessionConsumer: Send + Sync {
    /// The signed-in user, if any
    fn user(&self) -> Option<Session>;

    /// Whether session resolution is still in progress
    fn is_loading(&self) -> bool;

    /// Message of the last failed callback
    fn error(&self) -> Option<String>;

    /// Start a login; returns the authorization URL navigated to
    fn login(&self) -> Result<String>;

    /// Log out at the provider
    async fn logout(&self);

    /// Exchange an authorization code
    async fn handle_callback(&self, code: &str) -> Result<()>;

    /// Bearer token for outbound API calls
    async fn access_token(&self) -> Option<String>;
}

#[async_trait]
impl SessionConsumer for SessionMachine {
    fn user(&self) -> Option<Session> {
        self.snapshot().user
    }

    fn is_loading(&self) -> bool {
        self.snapshot().is_loading
    }

    fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    fn login(&self) -> Result<String> {
        SessionMachine::login(self)
    }

    async fn logout(&self) {
        SessionMachine::logout(self).await;
    }

    async fn handle_callback(&self, code: &str) -> Result<()> {
        SessionMachine::handle_callback(self, code).await
    }

    async fn access_token(&self) -> Option<String> {
        SessionMachine::access_token(self).await
    }
}
