//! Testing utilities and helpers
//!
//! - **[`mocks`]**: Mock implementations of common traits
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "platform")]
//! # {
//! use oidc_session_common::testing::MockKeychainProvider;
//!
//! let keychain = MockKeychainProvider::new("oidc-session-test");
//! keychain.set_secret("accessToken", "token").unwrap();
//! assert!(keychain.secret_exists("accessToken"));
//! # }
//! ```

#[cfg(feature = "platform")]
pub mod mocks;

#[cfg(feature = "platform")]
pub use mocks::MockKeychainProvider;
