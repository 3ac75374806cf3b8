//! Shared test helpers for `oidc-session-core` integration tests.
//!
//! Lightweight in-memory implementations of the session ports so tests can
//! focus on machine behaviour instead of boilerplate.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use oidc_session_core::{
    IdentityProvider, Navigation, Navigator, PersistedRecord, SessionMachine, SessionStore,
};
use oidc_session_domain::{Claims, ProviderConfig, Result, SessionError, TokenPair};

/// In-memory `SessionStore` with failure switches.
#[derive(Default)]
pub struct MockStore {
    record: Mutex<Option<PersistedRecord>>,
    pub puts: AtomicUsize,
    pub clears: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_puts: AtomicBool,
    /// `put` replaces only the access token of an existing record, then fails
    pub tear_puts: AtomicBool,
    pub corrupt_reads: AtomicBool,
    /// Number of upcoming `clear` calls that fail
    pub failing_clears: AtomicUsize,
}

impl MockStore {
    pub fn with_record(record: PersistedRecord) -> Self {
        let store = Self::default();
        *store.record.lock().unwrap() = Some(record);
        store
    }

    pub fn record(&self) -> Option<PersistedRecord> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MockStore {
    async fn put(&self, record: &PersistedRecord) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(SessionError::Storage("disk full".to_string()));
        }
        if self.tear_puts.load(Ordering::SeqCst) {
            if let Some(existing) = self.record.lock().unwrap().as_mut() {
                existing.access_token = record.access_token.clone();
            }
            return Err(SessionError::Storage("write interrupted".to_string()));
        }
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    async fn read(&self) -> Result<Option<PersistedRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SessionError::Storage("unreadable".to_string()));
        }
        if self.corrupt_reads.load(Ordering::SeqCst) && self.record.lock().unwrap().is_some() {
            return Err(SessionError::CorruptRecord("expected value at line 1".to_string()));
        }
        Ok(self.record.lock().unwrap().clone())
    }

    async fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing_clears.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_clears.store(failing - 1, Ordering::SeqCst);
            return Err(SessionError::Storage("locked".to_string()));
        }
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

/// Scripted `IdentityProvider` that counts calls.
pub struct MockProvider {
    pub tokens: Mutex<Result<TokenPair>>,
    pub claims: Mutex<Result<Claims>>,
    pub exchange_delay: Duration,
    pub exchanges: AtomicUsize,
    pub claim_fetches: AtomicUsize,
    pub seen_access_tokens: Mutex<Vec<String>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            tokens: Mutex::new(Ok(TokenPair::new("access-1", "id-1"))),
            claims: Mutex::new(Ok(Claims::new("abc").with_display_name("Ada Lovelace"))),
            exchange_delay: Duration::ZERO,
            exchanges: AtomicUsize::new(0),
            claim_fetches: AtomicUsize::new(0),
            seen_access_tokens: Mutex::new(Vec::new()),
        }
    }
}

impl MockProvider {
    pub fn failing_exchange(err: SessionError) -> Self {
        Self { tokens: Mutex::new(Err(err)), ..Self::default() }
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self { tokens: Mutex::new(Ok(tokens)), ..Self::default() }
    }

    pub fn with_exchange_delay(delay: Duration) -> Self {
        Self { exchange_delay: delay, ..Self::default() }
    }

    pub fn network_calls(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst) + self.claim_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn exchange_code(&self, _code: &str) -> Result<TokenPair> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if !self.exchange_delay.is_zero() {
            tokio::time::sleep(self.exchange_delay).await;
        }
        self.tokens.lock().unwrap().clone()
    }

    async fn fetch_claims(&self, access_token: &str) -> Result<Claims> {
        self.claim_fetches.fetch_add(1, Ordering::SeqCst);
        self.seen_access_tokens.lock().unwrap().push(access_token.to_string());
        self.claims.lock().unwrap().clone()
    }
}

/// `Navigator` that records every navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    pub navigations: Mutex<Vec<Navigation>>,
    pub fail_external: AtomicBool,
}

impl RecordingNavigator {
    pub fn recorded(&self) -> Vec<Navigation> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.navigations.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, navigation: Navigation) -> Result<()> {
        if matches!(navigation, Navigation::External(_)) && self.fail_external.load(Ordering::SeqCst)
        {
            return Err(SessionError::Transport("navigation blocked".to_string()));
        }
        self.navigations.lock().unwrap().push(navigation);
        Ok(())
    }
}

pub fn test_config() -> ProviderConfig {
    ProviderConfig::new(
        "https://auth.example.com",
        "crm",
        "s3cret",
        "https://app.example.com/oauth/callback",
    )
}

/// Machine wired to the given mocks.
pub struct Harness {
    pub machine: Arc<SessionMachine>,
    pub store: Arc<MockStore>,
    pub provider: Arc<MockProvider>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(store: MockStore, provider: MockProvider) -> Self {
        Self::with_config(test_config(), store, provider)
    }

    pub fn with_config(config: ProviderConfig, store: MockStore, provider: MockProvider) -> Self {
        let store = Arc::new(store);
        let provider = Arc::new(provider);
        let navigator = Arc::new(RecordingNavigator::default());
        let machine = Arc::new(SessionMachine::new(
            config,
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::clone(&provider) as Arc<dyn IdentityProvider>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        ));
        Self { machine, store, provider, navigator }
    }

    pub fn default_mocks() -> Self {
        Self::new(MockStore::default(), MockProvider::default())
    }
}

pub fn stored_record(user_info: &str) -> PersistedRecord {
    PersistedRecord::new("stored-access", "stored-id", user_info)
}
