//! Trait abstractions for secret storage
//!
//! Adapters that persist secrets depend on [`SecretStore`] rather than on the
//! platform keychain directly, so tests can swap in
//! `testing::MockKeychainProvider`.

use super::keychain::KeychainError;

/// Key/value secret storage scoped to one service
pub trait SecretStore: Send + Sync {
    /// Store or overwrite a secret.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the write.
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Read a secret.
    ///
    /// # Errors
    /// Returns `KeychainError::NotFound` if no secret is stored under `key`.
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Delete a secret; deleting a missing secret succeeds.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the delete.
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;

    /// Service name the secrets are scoped to.
    fn service_name(&self) -> &str;
}
