use async_trait::async_trait;
use oidc_session_core::{PersistedRecord, SessionStore};
use oidc_session_domain::Result;
use parking_lot::RwLock;

/// Session store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: RwLock<Option<PersistedRecord>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `record` already stored.
    #[must_use]
    pub fn with_record(record: PersistedRecord) -> Self {
        Self { record: RwLock::new(Some(record)) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, record: &PersistedRecord) -> Result<()> {
        *self.record.write() = Some(record.clone());
        Ok(())
    }

    async fn read(&self) -> Result<Option<PersistedRecord>> {
        Ok(self.record.read().clone())
    }

    async fn clear(&self) -> Result<()> {
        self.record.write().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_read_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.read().await.unwrap(), None);

        let record = PersistedRecord::new("access", "id", r#"{"sub":"abc"}"#);
        store.put(&record).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(record));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }
}
