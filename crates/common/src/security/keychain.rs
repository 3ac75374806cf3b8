//! Generic keychain provider for secure credential storage
//!
//! This module exposes a thin wrapper over the platform keychain for storing
//! arbitrary secrets across macOS (Keychain Access), Windows (Credential
//! Manager), and Linux (Secret Service API).
//!
//! ## Usage
//!
//! ```no_run
//! use oidc_session_common::security::keychain::KeychainProvider;
//!
//! let keychain = KeychainProvider::new("oidc-session");
//! keychain.set_secret("accessToken", "opaque-token")?;
//! let secret = keychain.get_secret("accessToken")?;
//! assert_eq!(secret, "opaque-token");
//! # Ok::<(), oidc_session_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

use super::traits::SecretStore;

/// Generic keychain provider for secure credential storage
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    /// Create a new keychain provider for a specific service
    ///
    /// # Arguments
    /// * `service_name` - Service identifier (e.g., "oidc-session")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    /// Store a secret value in the platform keychain
    ///
    /// Values are never logged; only the key and the value length are.
    ///
    /// # Arguments
    /// * `key` - Logical key (e.g., "accessToken")
    /// * `value` - Secret value to persist
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if keychain access fails
    pub fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(
            service = %self.service_name,
            key = %key,
            value_len = value.len(),
            "Storing secret in keychain"
        );

        let entry = self.create_entry(key)?;
        entry.set_password(value).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to store secret for {key}: {e}"))
        })?;

        debug!(service = %self.service_name, key = %key, "Secret stored successfully");

        Ok(())
    }

    /// Retrieve a secret value from the platform keychain
    ///
    /// # Errors
    /// Returns `KeychainError::NotFound` if secret doesn't exist
    /// Returns `KeychainError::AccessFailed` if keychain access fails
    pub fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.create_entry(key)?;
        let secret = entry.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                KeychainError::NotFound
            } else {
                KeychainError::AccessFailed(format!("Failed to retrieve secret for {key}: {e}"))
            }
        })?;

        Ok(secret)
    }

    /// Delete a secret from the platform keychain (idempotent)
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if keychain access fails
    pub fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.create_entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => {
                return Err(KeychainError::AccessFailed(format!(
                    "Failed to delete secret for {key}: {e}"
                )));
            }
        }

        debug!(service = %self.service_name, key = %key, "Secret deleted successfully");

        Ok(())
    }

    /// Check if a secret exists in the keychain
    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.create_entry(key).is_ok_and(|entry| entry.get_password().is_ok())
    }

    /// Service name this provider is scoped to
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn create_entry(&self, account: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, account).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to create keychain entry: {e}"))
        })
    }
}

impl SecretStore for KeychainProvider {
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

/// Keychain error types
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    /// Entry not found in keychain
    #[error("Entry not found")]
    NotFound,

    /// Underlying keyring library error
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

#[cfg(test)]
mod tests {
    //! Unit tests for security::keychain.
    use super::*;
    use crate::testing::MockKeychainProvider;

    /// Validates `KeychainProvider::new` behavior for the keychain provider
    /// creation scenario.
    ///
    /// Assertions:
    /// - Confirms `keychain.service_name()` equals `"test-service"`.
    #[test]
    fn test_keychain_provider_creation() {
        let keychain = KeychainProvider::new("test-service");
        assert_eq!(keychain.service_name(), "test-service");
        assert_eq!(SecretStore::service_name(&keychain), "test-service");
    }

    /// Validates `MockKeychainProvider` behavior through the `SecretStore`
    /// trait for the set get and delete secret scenario.
    ///
    /// Assertions:
    /// - Confirms the retrieved secret equals `"super-secret"`.
    /// - Ensures a deleted secret reports `KeychainError::NotFound`.
    #[test]
    fn test_set_get_and_delete_secret_via_trait() {
        let store: Box<dyn SecretStore> = Box::new(MockKeychainProvider::new("test-service"));

        store.set_secret("accessToken", "super-secret").unwrap();
        assert_eq!(store.get_secret("accessToken").unwrap(), "super-secret");

        store.delete_secret("accessToken").unwrap();
        assert!(matches!(store.get_secret("accessToken"), Err(KeychainError::NotFound)));
    }

    #[test]
    fn test_delete_secret_idempotent() {
        let keychain = MockKeychainProvider::new("test-service");
        keychain.delete_secret("idToken").unwrap();
        keychain.set_secret("idToken", "value").unwrap();
        keychain.delete_secret("idToken").unwrap();
        keychain.delete_secret("idToken").unwrap();
    }
}
