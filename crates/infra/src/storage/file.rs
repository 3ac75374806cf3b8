//! Session record kept in a single JSON document
//!
//! The document maps the three record keys to their string values. Writes go
//! to a sibling temporary file which is then renamed over the target, so a
//! reader sees either the old record or the new one.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use oidc_session_core::{PersistedRecord, SessionStore};
use oidc_session_domain::constants::{
    STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_ID_TOKEN, STORAGE_KEY_USER_INFO,
};
use oidc_session_domain::{Result, SessionError};
use tracing::{debug, warn};

use crate::errors::InfraError;

type Document = BTreeMap<String, String>;

/// File-backed [`SessionStore`]
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(err: impl Into<InfraError>) -> SessionError {
    let infra: InfraError = err.into();
    infra.into()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn put(&self, record: &PersistedRecord) -> Result<()> {
        let document: Document = [
            (STORAGE_KEY_ACCESS_TOKEN, &record.access_token),
            (STORAGE_KEY_ID_TOKEN, &record.id_token),
            (STORAGE_KEY_USER_INFO, &record.user_info),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
        let bytes = serde_json::to_vec_pretty(&document).map_err(storage_error)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await.map_err(storage_error)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(storage_error)?;

        debug!(path = %self.path.display(), "Session record written");
        Ok(())
    }

    async fn read(&self) -> Result<Option<PersistedRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(err)),
        };

        let mut document: Document = serde_json::from_slice(&bytes).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "Session record is not a valid document");
            SessionError::CorruptRecord(err.to_string())
        })?;
        let mut take = |key: &str| document.remove(key).filter(|value| !value.is_empty());

        match (take(STORAGE_KEY_ACCESS_TOKEN), take(STORAGE_KEY_ID_TOKEN), take(STORAGE_KEY_USER_INFO)) {
            (Some(access_token), Some(id_token), Some(user_info)) => {
                Ok(Some(PersistedRecord { access_token, id_token, user_info }))
            }
            _ => {
                warn!(path = %self.path.display(), "Session record is incomplete");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session record removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn record() -> PersistedRecord {
        PersistedRecord::new("access-1", "id-1", r#"{"sub":"abc","name":"Ada"}"#)
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.read().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn writes_document_with_record_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = FileSessionStore::new(&path);

        store.put(&record()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "access-1");
        assert_eq!(raw["idToken"], "id-1");
        assert_eq!(raw["userInfo"], r#"{"sub":"abc","name":"Ada"}"#);
        assert!(!store.temp_path().exists());

        assert_eq!(store.read().await.unwrap(), Some(record()));
    }

    #[tokio::test]
    async fn partial_document_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"accessToken":"a","userInfo":"{}"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparsable_document_is_corrupt_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"accessToken":"a", garbage"#).unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.read().await, Err(SessionError::CorruptRecord(_))));

        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store.put(&record()).await.unwrap();
        store.clear().await.unwrap();

        assert!(!path.exists());
        assert_eq!(store.read().await.unwrap(), None);
    }
}
