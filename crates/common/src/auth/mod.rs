//! Authorization-flow helpers shared by the session client
//!
//! Currently limited to the random `state` parameter sent with the
//! authorization redirect and its validation on the way back.

pub mod state;

pub use state::{generate_state, validate_state};
