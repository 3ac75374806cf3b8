//! # OIDC Session Core
//!
//! Pure session logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, the identity provider and
//!   navigation
//! - The session state machine and its consumer surface
//! - Route guarding and callback-parameter parsing
//!
//! ## Architecture Principles
//! - Only depends on `oidc-session-common` and `oidc-session-domain`
//! - No HTTP, storage or platform code
//! - All external dependencies via traits

pub mod routing;
pub mod session;

pub use routing::{GuardDecision, RouteGuard};
pub use session::{
    CallbackParams, IdentityProvider, Navigation, Navigator, PersistedRecord, ProcessedCodes,
    SessionConsumer, SessionMachine, SessionStore,
};
