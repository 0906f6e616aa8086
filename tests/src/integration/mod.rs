//! # Integration Tests
//!
//! The full locator stack wired against a local mock of its upstream APIs.

pub mod flows;
#[cfg(test)]
pub mod upstream;
