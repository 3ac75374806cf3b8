//! Security primitives and utilities
//!
//! Platform keychain access and the [`SecretStore`] abstraction adapters use
//! to persist credentials.

pub mod keychain;
pub mod traits;

pub use keychain::{KeychainError, KeychainProvider};
pub use traits::SecretStore;
