//! # OIDC Session Domain
//!
//! Domain types and models for the OpenID-Connect session client.
//!
//! This crate contains:
//! - Session, claims and state-machine state types
//! - The session error taxonomy and Result alias
//! - Provider and application configuration structures
//! - Protocol constants (endpoint paths, storage keys, timeouts)
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::path::get_path;
