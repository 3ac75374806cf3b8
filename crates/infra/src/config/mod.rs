//! Configuration loading
//!
//! This module loads the application configuration from environment
//! variables and files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, load_from_lookup, probe_config_paths};
