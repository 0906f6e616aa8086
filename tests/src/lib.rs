//! # Provider Locator Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for the selection hot paths
//! │   └── selection.rs
//! │
//! └── integration/      # End-to-end flows over real sockets
//!     ├── upstream.rs   # Mock directory + geolocation server
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sp-tests
//!
//! # End-to-end flows only
//! cargo test -p sp-tests integration::
//!
//! # Benchmarks
//! cargo bench -p sp-tests
//! ```

pub mod benchmarks;
pub mod integration;
