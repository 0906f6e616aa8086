//! # Provider Selection Subsystem
//!
//! **Subsystem ID:** 1
//!
//! This crate picks a storage provider for a caller: it narrows the
//! marketplace directory down to providers accepting the requested piece
//! size, then either picks the provider geographically nearest to a source
//! address or falls back to a seeded random choice.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure logic (multiaddr extraction, coordinates,
//!   haversine distance, piece-size filtering, nearest reduction)
//! - **Ports Layer:** Trait definitions for the directory and geolocation APIs
//! - **Service Layer:** Wires domain to ports (deadlines, bounded concurrency)
//! - **Adapters Layer:** reqwest-backed HTTP clients (feature `http`)
//!
//! ## Example
//!
//! ```rust
//! use sp_01_provider_selection::{
//!     extract_ip4, filter_by_piece_size, great_circle_distance, Candidate, Coordinate,
//! };
//!
//! let candidates = vec![
//!     Candidate::new("f01000", vec!["/ip4/203.0.113.5/tcp/4001".into()], 256, 1 << 30),
//!     Candidate::new("f02000", vec!["/dns4/example.org/tcp/24001".into()], 1 << 31, 1 << 35),
//! ];
//!
//! let eligible = filter_by_piece_size(candidates, 1 << 20);
//! assert_eq!(eligible.len(), 1);
//!
//! let literal = extract_ip4(&eligible[0].addresses()[0]).unwrap();
//! assert_eq!(literal.as_str(), "203.0.113.5");
//!
//! let paris = Coordinate::from_degrees(48.8566, 2.3522).unwrap();
//! let london = Coordinate::from_degrees(51.5074, -0.1278).unwrap();
//! let km = great_circle_distance(&paris, &london);
//! assert!((km - 343.5).abs() < 1.0);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// FEATURE-GATED MODULES
// =============================================================================

/// HTTP adapters for the upstream APIs.
/// Requires feature: `http`
#[cfg(feature = "http")]
pub mod adapters;

/// In-memory port implementations.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS (Always Available)
// =============================================================================

// Domain entities
pub use domain::{
    AddressError, Candidate, Coordinate, CoordinateError, Multiaddrs, NearestMatch,
    NearestTracker, NetworkAddressLiteral, PieceSizeRange, ProviderRecord, SelectionConfig,
    EARTH_RADIUS_KM,
};

// Domain services
pub use domain::{
    extract_ip4, filter_by_piece_size, great_circle_distance, lookup_targets, select_random,
};

// Port traits
pub use ports::{
    DirectoryError, GeolocationError, Geolocator, ProviderDirectory, ProviderSelectionApi,
    SelectionError, SelectionRequest,
};

// Service
pub use service::ProviderSelectionService;

// =============================================================================
// ADAPTER RE-EXPORTS (Feature-Gated)
// =============================================================================

#[cfg(feature = "http")]
pub use adapters::{decode_location, HttpGeolocator, HttpProviderDirectory};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{InMemoryProviderDirectory, StaticGeolocator};
