//! Common Test Utilities
//!
//! Shared fixtures used across test modules: temporary databases and
//! record builders with controllable creation timestamps.

pub mod fixtures;

pub use fixtures::*;
