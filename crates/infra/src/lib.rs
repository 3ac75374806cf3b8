//! # OIDC Session Infrastructure
//!
//! Infrastructure implementations of the session ports.
//!
//! This crate contains:
//! - The HTTP identity provider (token exchange, user info)
//! - Session stores (memory, JSON file, platform keychain)
//! - A channel-backed navigator and a bearer-authorized request client
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `oidc-session-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod config;
pub mod errors;
pub mod http;
pub mod identity;
pub mod navigation;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{AuthorizedClient, HttpClient, HttpClientBuilder, HttpResponse};
pub use identity::HttpIdentityProvider;
pub use navigation::ChannelNavigator;
pub use observability::init_tracing;
pub use storage::{build_store, FileSessionStore, KeychainSessionStore, MemorySessionStore};
