//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks are used instead of mockall: they are explicit, easy to
//! debug, and the in-memory adapter already covers the happy path.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
