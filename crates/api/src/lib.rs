//! # OIDC Session App
//!
//! Application layer - commands and the `oidc-session` entry point.
//!
//! This crate contains:
//! - Session commands with serializable responses
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
