//! Commands - front end to session bridge

mod session;

pub use session::*;
