//! Integration test utilities for the Bright City site
//!
//! Spawns the real server against Postgres (and Redis when configured) and
//! drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
