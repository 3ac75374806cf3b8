//! Session state machine - core business logic
//!
//! Owns the single [`Session`] value of the process and every transition of
//! [`SessionState`]. Observers follow along through a `watch` channel; each
//! transition publishes a complete [`AuthSnapshot`].

use std::sync::Arc;

use oidc_session_common::{generate_state, validate_state};
use oidc_session_domain::constants::DEFAULT_HOME_PATH;
use oidc_session_domain::{
    AuthSnapshot, Claims, ProviderConfig, Result, Session, SessionError, SessionState, TokenPair,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use url::Url;

use super::callback::CallbackParams;
use super::ports::{IdentityProvider, Navigation, Navigator, PersistedRecord, SessionStore};
use super::processed::ProcessedCodes;

/// Message used when the provider reports an error without a description.
pub const PROVIDER_REJECTED_FALLBACK: &str = "Authentifizierung fehlgeschlagen";

/// The session state machine
pub struct SessionMachine {
    config: ProviderConfig,
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    processed: ProcessedCodes,
    pending_state: Mutex<Option<String>>,
    snapshot: watch::Sender<AuthSnapshot>,
}

impl SessionMachine {
    /// Create a machine in the `Uninitialized` state
    pub fn new(
        config: ProviderConfig,
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (snapshot, _) = watch::channel(AuthSnapshot::initial());
        Self {
            config,
            store,
            provider,
            navigator,
            processed: ProcessedCodes::new(),
            pending_state: Mutex::new(None),
            snapshot,
        }
    }

    /// Provider configuration the machine was built with
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receive every snapshot published from now on
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.snapshot.subscribe()
    }

    /// Whether `code` has already been handed to the token exchange
    #[must_use]
    pub fn is_code_processed(&self, code: &str) -> bool {
        self.processed.contains(code)
    }

    /// Restore a persisted session
    ///
    /// A complete record whose claims blob parses yields `Authenticated`.
    /// A corrupt record or claims blob clears the store. Every failure ends
    /// in `Unauthenticated` without an error; this call never fails.
    pub async fn restore(&self) {
        self.publish(SessionState::Restoring, None);

        let record = match self.store.read().await {
            Ok(Some(record)) if record.is_complete() => record,
            Ok(_) => {
                debug!("No persisted session found");
                self.publish(SessionState::Unauthenticated { error: None }, None);
                return;
            }
            Err(SessionError::CorruptRecord(reason)) => {
                warn!(reason = %reason, "Persisted session record is corrupt, clearing session");
                self.clear_or_log().await;
                self.publish(SessionState::Unauthenticated { error: None }, None);
                return;
            }
            Err(err) => {
                warn!(error = %err, "Failed to read persisted session");
                self.publish(SessionState::Unauthenticated { error: None }, None);
                return;
            }
        };

        match Claims::from_json_str(&record.user_info) {
            Ok(claims) => {
                let session =
                    Session::new(TokenPair::new(record.access_token, record.id_token), claims);
                info!(subject = %session.subject(), "Restored persisted session");
                self.publish(SessionState::Authenticated, Some(session));
            }
            Err(err) => {
                warn!(error = %err, "Persisted user info is corrupt, clearing session");
                self.clear_or_log().await;
                self.publish(SessionState::Unauthenticated { error: None }, None);
            }
        }
    }

    /// Build the authorization URL with a fresh `state` and remember that
    /// state as pending.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the provider URL does not parse.
    pub fn authorization_url(&self) -> Result<String> {
        let state = generate_state();
        let scope = self.config.scope_string();
        let url = Url::parse_with_params(
            &self.config.authorization_endpoint(),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| SessionError::Config(format!("invalid authorization endpoint: {e}")))?;

        *self.pending_state.lock() = Some(state);
        Ok(url.into())
    }

    /// Redirect to the provider's login page
    ///
    /// The store is not touched. Returns the URL navigated to.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the URL cannot be built, or the
    /// navigator's error if the redirect cannot be started.
    pub fn login(&self) -> Result<String> {
        let url = self.authorization_url()?;
        info!(endpoint = %self.config.authorization_endpoint(), "Redirecting to identity provider");
        self.navigator.navigate(Navigation::External(url.clone()))?;
        Ok(url)
    }

    /// Exchange an authorization code for a session
    ///
    /// A code is exchanged at most once per process: a repeated code makes no
    /// network call, navigates home and succeeds. The code is marked before
    /// the first network call and stays marked when the exchange fails.
    ///
    /// # Errors
    /// Returns the exchange, user-info, decoding or storage failure. The
    /// same error is recorded in the published snapshot. A failed write
    /// clears the store so no mix of old and new entries survives.
    pub async fn handle_callback(&self, code: &str) -> Result<()> {
        if !self.processed.try_claim(code) {
            info!("Authorization code already processed, skipping exchange");
            self.navigate_or_warn(Navigation::Internal(self.config.home_path.clone()));
            return Ok(());
        }

        let current_user = self.snapshot.borrow().user.clone();
        self.publish(SessionState::Exchanging, current_user);

        match self.exchange(code).await {
            Ok(session) => {
                info!(subject = %session.subject(), "Session established");
                self.publish(SessionState::Authenticated, Some(session));
                self.navigate_or_warn(Navigation::Internal(self.config.home_path.clone()));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, kind = err.label(), "Callback handling failed");
                self.publish(SessionState::Unauthenticated { error: Some(err.to_string()) }, None);
                Err(err)
            }
        }
    }

    /// Handle the full redirect back from the provider
    ///
    /// Checks the provider `error` parameter, the presence of a code and,
    /// when enabled in the configuration, the returned `state` before
    /// delegating to [`Self::handle_callback`]. These checks leave the
    /// session untouched and make no network call.
    ///
    /// # Errors
    /// [`SessionError::ProviderRejected`], [`SessionError::MissingAuthorizationCode`]
    /// or [`SessionError::StateMismatch`] from the checks, otherwise whatever
    /// `handle_callback` returns.
    pub async fn handle_redirect(&self, params: &CallbackParams) -> Result<()> {
        if let Some(error_code) = params.error.as_deref() {
            let message = params
                .error_description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(PROVIDER_REJECTED_FALLBACK)
                .to_string();
            warn!(error_code = %error_code, "Identity provider rejected the login");
            return Err(SessionError::ProviderRejected(message));
        }

        let Some(code) = params.code() else {
            warn!("Callback carried no authorization code");
            return Err(SessionError::MissingAuthorizationCode);
        };

        if self.config.verify_state && !self.processed.contains(code) {
            let mut pending = self.pending_state.lock();
            let matches = match (pending.as_deref(), params.state.as_deref()) {
                (Some(expected), Some(actual)) => validate_state(expected, actual),
                _ => false,
            };
            if matches {
                pending.take();
            }
            drop(pending);
            if !matches {
                warn!("Callback state does not match the pending login");
                return Err(SessionError::StateMismatch);
            }
        }

        self.handle_callback(code).await
    }

    /// Log out at the provider
    ///
    /// Clears the store and the session, then redirects to the provider's
    /// logout page. If either step fails the store clear is retried and the
    /// user agent is sent to the application root instead. Never fails.
    pub async fn logout(&self) {
        let cleared = self.store.clear().await;
        self.publish(SessionState::Unauthenticated { error: None }, None);

        let outcome = match cleared {
            Ok(()) => self.navigator.navigate(Navigation::External(self.config.logout_url())),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => info!("Logged out, redirecting to provider logout"),
            Err(err) => {
                error!(error = %err, "Logout failed, falling back to local logout");
                if let Err(retry_err) = self.store.clear().await {
                    error!(error = %retry_err, "Retrying session clear failed");
                }
                self.navigate_or_warn(Navigation::Internal(DEFAULT_HOME_PATH.to_string()));
            }
        }
    }

    /// Log out locally without contacting the provider
    pub async fn local_logout(&self) {
        if let Err(err) = self.store.clear().await {
            error!(error = %err, "Failed to clear session during local logout");
        }
        self.publish(SessionState::Unauthenticated { error: None }, None);
        info!("Local logout complete");
        self.navigate_or_warn(Navigation::Internal(DEFAULT_HOME_PATH.to_string()));
    }

    /// Current access token
    ///
    /// Taken from the live session when authenticated, otherwise read from
    /// the store. Any failure yields `None`.
    pub async fn access_token(&self) -> Option<String> {
        let live = self
            .snapshot
            .borrow()
            .user
            .as_ref()
            .filter(|session| session.is_authenticated())
            .map(|session| session.access_token.clone());
        if live.is_some() {
            return live;
        }

        match self.store.read().await {
            Ok(record) => {
                record.map(|r| r.access_token).filter(|token| !token.is_empty())
            }
            Err(err) => {
                debug!(error = %err, "Store read failed while looking up access token");
                None
            }
        }
    }

    async fn exchange(&self, code: &str) -> Result<Session> {
        let tokens = self.provider.exchange_code(code).await?;
        if tokens.access_token.is_empty() || tokens.id_token.is_empty() {
            return Err(SessionError::InvalidTokenResponse);
        }
        debug!(
            access_token_len = tokens.access_token.len(),
            id_token_len = tokens.id_token.len(),
            "Token exchange succeeded"
        );

        let claims = self.provider.fetch_claims(&tokens.access_token).await?;

        let record = PersistedRecord::new(
            tokens.access_token.as_str(),
            tokens.id_token.as_str(),
            claims.to_json_string()?,
        );
        if let Err(err) = self.store.put(&record).await {
            // A failed write may have replaced only some entries.
            self.clear_or_log().await;
            return Err(match err {
                SessionError::Storage(_) => err,
                other => SessionError::Storage(other.to_string()),
            });
        }

        Ok(Session::new(tokens, claims))
    }

    async fn clear_or_log(&self) {
        if let Err(err) = self.store.clear().await {
            error!(error = %err, "Failed to clear session record");
        }
    }

    fn publish(&self, state: SessionState, user: Option<Session>) {
        debug!(state = state.label(), "Session state transition");
        self.snapshot.send_replace(AuthSnapshot::from_state(state, user));
    }

    fn navigate_or_warn(&self, navigation: Navigation) {
        if let Err(err) = self.navigator.navigate(navigation.clone()) {
            warn!(error = %err, target = %navigation.target(), "Navigation failed");
        }
    }
}
