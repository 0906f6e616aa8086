//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the selection API this subsystem exposes
//!   to the gateway
//! - **Driven Ports (Outbound):** the provider directory and the geolocation
//!   lookup, implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::{ProviderSelectionApi, SelectionError, SelectionRequest};
pub use outbound::{DirectoryError, GeolocationError, Geolocator, ProviderDirectory};
