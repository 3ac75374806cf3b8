//! Domain types and models

pub mod session;
pub mod state;

pub use session::{Claims, Session, TokenPair};
pub use state::{AuthSnapshot, SessionState};
