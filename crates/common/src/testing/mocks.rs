//! Mock implementations of common traits
//!
//! Provides mock objects for testing purposes.

// Allow missing error docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::security::{KeychainError, SecretStore};

type StorageData = Arc<Mutex<HashMap<String, String>>>;

/// In-memory stand-in for the platform keychain.
///
/// Clones share storage, so a test can keep a handle while an adapter owns
/// another. Writes and deletes can be made to fail to exercise error paths.
#[derive(Debug, Clone)]
pub struct MockKeychainProvider {
    storage: StorageData,
    service_name: String,
    fail_writes: Arc<AtomicBool>,
    fail_write_key: Arc<Mutex<Option<String>>>,
    fail_deletes: Arc<AtomicBool>,
    delete_calls: Arc<AtomicUsize>,
}

impl MockKeychainProvider {
    /// Create a new mock keychain provider with a service name for namespacing.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            service_name: service_name.into(),
            fail_writes: Arc::new(AtomicBool::new(false)),
            fail_write_key: Arc::new(Mutex::new(None)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Store an arbitrary secret value in memory.
    pub fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        let key_fails = self.fail_write_key.lock().as_deref() == Some(key);
        if key_fails || self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessFailed(format!("mock write failure for {key}")));
        }
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Retrieve a secret value or return `KeychainError::NotFound`.
    pub fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        self.storage.lock().get(key).cloned().ok_or(KeychainError::NotFound)
    }

    /// Delete a secret value (idempotent).
    pub fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessFailed(format!("mock delete failure for {key}")));
        }
        self.storage.lock().remove(key);
        Ok(())
    }

    /// Determine whether a secret exists.
    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.lock().is_empty()
    }

    /// Make subsequent writes fail with `KeychainError::AccessFailed`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes of `key` fail while other keys still succeed.
    pub fn fail_writes_for(&self, key: impl Into<String>) {
        *self.fail_write_key.lock() = Some(key.into());
    }

    /// Make subsequent deletes fail with `KeychainError::AccessFailed`.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of delete attempts, including failed ones.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockKeychainProvider {
    fn default() -> Self {
        Self::new("oidc-session-test")
    }
}

impl SecretStore for MockKeychainProvider {
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        Self::set_secret(self, key, value)
    }

    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        Self::get_secret(self, key)
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        Self::delete_secret(self, key)
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::mocks.
    use super::*;

    /// Validates `MockKeychainProvider::new` behavior for the shared storage
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms a clone observes writes made through the original.
    #[test]
    fn test_mock_keychain_clones_share_storage() {
        let keychain = MockKeychainProvider::new("test-service");
        let handle = keychain.clone();

        keychain.set_secret("accessToken", "a").unwrap();
        assert_eq!(handle.get_secret("accessToken").unwrap(), "a");
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_mock_keychain_failure_injection() {
        let keychain = MockKeychainProvider::default();
        keychain.set_fail_writes(true);
        assert!(matches!(keychain.set_secret("k", "v"), Err(KeychainError::AccessFailed(_))));
        assert!(keychain.is_empty());

        keychain.set_fail_writes(false);
        keychain.set_secret("k", "v").unwrap();
        keychain.set_fail_deletes(true);
        assert!(keychain.delete_secret("k").is_err());
        assert!(keychain.secret_exists("k"));
        assert_eq!(keychain.delete_calls(), 1);
    }
}
