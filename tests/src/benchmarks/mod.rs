//! # Provider Locator Benchmarks
//!
//! Hot paths of a single selection request, measured at marketplace scale.

pub mod selection;
