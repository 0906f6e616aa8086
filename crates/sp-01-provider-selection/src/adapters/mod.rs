//! # HTTP Adapters
//!
//! reqwest-backed implementations of the outbound ports: the storage
//! marketplace directory and an IP geolocation service.
//!
//! Response decoding is kept in plain functions so it can be tested without
//! a network.

pub mod directory;
pub mod geolocation;

pub use directory::*;
pub use geolocation::*;
