//! Identity provider adapters

pub mod provider;

pub use provider::HttpIdentityProvider;
