//! Session record kept in the platform keychain

use std::sync::Arc;

use async_trait::async_trait;
use oidc_session_common::{KeychainError, KeychainProvider, SecretStore};
use oidc_session_core::{PersistedRecord, SessionStore};
use oidc_session_domain::constants::{
    STORAGE_KEYS, STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_ID_TOKEN, STORAGE_KEY_USER_INFO,
};
use oidc_session_domain::Result;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// [`SessionStore`] writing one secret per record key
///
/// The secrets are scoped to the service name of the underlying
/// [`SecretStore`].
#[derive(Clone)]
pub struct KeychainSessionStore {
    secrets: Arc<dyn SecretStore>,
}

impl KeychainSessionStore {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    /// Store backed by the platform keychain under `service`.
    pub fn for_service(service: impl Into<String>) -> Self {
        Self::new(Arc::new(KeychainProvider::new(service)))
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        self.secrets.service_name()
    }

    fn lookup(&self, key: &str) -> Result<Option<String>> {
        match self.secrets.get_secret(key) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(KeychainError::NotFound) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn put(&self, record: &PersistedRecord) -> Result<()> {
        let entries = [
            (STORAGE_KEY_ACCESS_TOKEN, &record.access_token),
            (STORAGE_KEY_ID_TOKEN, &record.id_token),
            (STORAGE_KEY_USER_INFO, &record.user_info),
        ];
        for (key, value) in entries {
            if let Err(err) = self.secrets.set_secret(key, value) {
                warn!(service = %self.service_name(), key = %key, error = %err, "Failed to write keychain entry");
                // Entries from an earlier session must not pair with the ones just written.
                if let Err(clear_err) = self.clear().await {
                    warn!(error = %clear_err, "Rolling back partial keychain write failed");
                }
                return Err(InfraError::from(err).into());
            }
        }

        debug!(service = %self.service_name(), "Session record stored in keychain");
        Ok(())
    }

    async fn read(&self) -> Result<Option<PersistedRecord>> {
        let access_token = self.lookup(STORAGE_KEY_ACCESS_TOKEN)?;
        let id_token = self.lookup(STORAGE_KEY_ID_TOKEN)?;
        let user_info = self.lookup(STORAGE_KEY_USER_INFO)?;

        Ok(match (access_token, id_token, user_info) {
            (Some(access_token), Some(id_token), Some(user_info)) => {
                Some(PersistedRecord { access_token, id_token, user_info })
            }
            _ => None,
        })
    }

    async fn clear(&self) -> Result<()> {
        // Every key is attempted even if an earlier delete fails.
        let mut first_error = None;
        for key in STORAGE_KEYS {
            if let Err(err) = self.secrets.delete_secret(key) {
                warn!(service = %self.service_name(), key = %key, error = %err, "Failed to delete keychain entry");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(InfraError::from(err).into()),
            None => Ok(()),
        }
    }
}
