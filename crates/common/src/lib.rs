//! Modular common utilities shared across the OIDC session crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: tolerant response codec, `state` generation
//! - `platform`: platform integrations (keychain-backed secret storage)
//! - `test-utils`: in-memory mocks for the platform integrations

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;
#[cfg(feature = "foundation")]
pub mod codec;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use auth::{generate_state, validate_state};
#[cfg(feature = "foundation")]
pub use codec::{
    decode_compact_token_payload, decode_lenient, extract_error_message, CodecError, CodecResult,
};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider, SecretStore};
