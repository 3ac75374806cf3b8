//! Utility functions for domain logic

pub mod path;
