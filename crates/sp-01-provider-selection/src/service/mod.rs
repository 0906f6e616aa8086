//! # Provider Selection Service
//!
//! High-level service implementing the `ProviderSelectionApi` port.
//!
//! The service owns the request flow: directory fetch, piece-size filter,
//! then nearest or random selection. It holds only configuration and shared
//! adapters, so one instance serves any number of concurrent requests.

// Semantic submodules
mod api;
mod core;
mod nearest;

// Re-export public API
pub use core::ProviderSelectionService;
