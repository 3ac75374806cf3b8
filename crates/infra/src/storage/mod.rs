//! Session store adapters
//!
//! - [`MemorySessionStore`]: process-local, for tests and embedding
//! - [`FileSessionStore`]: JSON document replaced atomically
//! - [`KeychainSessionStore`]: platform keychain entries

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

pub use file::FileSessionStore;
pub use keychain::KeychainSessionStore;
pub use memory::MemorySessionStore;
use oidc_session_core::SessionStore;
use oidc_session_domain::StoreConfig;
use tracing::info;

/// Build the store selected by `config`.
#[must_use]
pub fn build_store(config: &StoreConfig) -> Arc<dyn SessionStore> {
    info!(kind = config.kind(), "Initialising session store");
    match config {
        StoreConfig::Memory => Arc::new(MemorySessionStore::new()),
        StoreConfig::File { path } => Arc::new(FileSessionStore::new(path.clone())),
        StoreConfig::Keychain { service } => Arc::new(KeychainSessionStore::for_service(service.clone())),
    }
}
