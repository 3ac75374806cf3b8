//! Command plumbing shared by the session commands

pub mod command_helpers;
pub mod logging;
