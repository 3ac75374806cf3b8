//! Application context - dependency injection container

use std::sync::Arc;

use oidc_session_core::{Navigation, RouteGuard, SessionMachine, SessionStore};
use oidc_session_domain::{AppConfig, Result};
use oidc_session_infra::{build_store, config, ChannelNavigator, HttpIdentityProvider};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

/// Application context - holds the session machine and its adapters
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<SessionMachine>,
    pub guard: RouteGuard,
    navigations: Mutex<UnboundedReceiver<Navigation>>,
}

impl AppContext {
    /// Load configuration from the environment or a config file and wire the
    /// adapters.
    ///
    /// # Errors
    /// Returns `SessionError::Config` if no valid configuration is found.
    pub fn new() -> Result<Self> {
        Self::new_with_config(config::load()?)
    }

    /// Wire the adapters selected by `config`.
    ///
    /// # Errors
    /// Returns `SessionError::Config` if the configuration is invalid, or
    /// `SessionError::Transport` if the HTTP client cannot be built.
    pub fn new_with_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let store = build_store(&config.store);
        Self::new_with_store(config, store)
    }

    /// Wire the context around an existing session store.
    ///
    /// # Errors
    /// Returns `SessionError::Transport` if the HTTP client cannot be built.
    pub fn new_with_store(config: AppConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let provider = Arc::new(HttpIdentityProvider::new(config.provider.clone())?);
        let (navigator, navigations) = ChannelNavigator::channel();

        let session = Arc::new(SessionMachine::new(
            config.provider.clone(),
            store,
            provider,
            Arc::new(navigator),
        ));
        let guard = RouteGuard::new(&config.provider.login_path, &config.provider.home_path);

        info!(store = config.store.kind(), provider = %config.provider.provider_url, "Application context ready");

        Ok(Self { config, session, guard, navigations: Mutex::new(navigations) })
    }

    /// Navigations issued since the last call, oldest first.
    pub fn drain_navigations(&self) -> Vec<Navigation> {
        let mut receiver = self.navigations.lock();
        std::iter::from_fn(|| receiver.try_recv().ok()).collect()
    }
}
