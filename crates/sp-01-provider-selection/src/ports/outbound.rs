//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this subsystem **requires** the host application
//! to implement: the marketplace directory and an IP geolocation service.

use crate::domain::{Coordinate, CoordinateError, NetworkAddressLiteral, ProviderRecord};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Source of provider records.
///
/// Records are fetched fresh for every request; implementations must not
/// serve stale snapshots.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one instance can serve
/// concurrent requests.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// List every provider the directory currently knows.
    async fn list_providers(&self) -> Result<Vec<ProviderRecord>, DirectoryError>;

    /// Fetch one provider by its identifier. `Ok(None)` means the directory
    /// answered but does not know the provider.
    async fn get_provider(&self, provider_id: &str)
        -> Result<Option<ProviderRecord>, DirectoryError>;
}

/// Resolves an IPv4 literal to a geographic position.
///
/// One call is one outbound lookup. Implementations do not cache; the
/// selector already deduplicates within a request.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self, address: &NetworkAddressLiteral)
        -> Result<Coordinate, GeolocationError>;
}

/// Errors from the provider directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Could not reach the directory or read its response
    #[error("directory request failed: {0}")]
    Transport(String),
    /// Directory answered with a non-success status
    #[error("directory returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    /// Response body was not the expected JSON
    #[error("malformed directory response: {0}")]
    Decode(String),
    /// Adapter misconfiguration (bad base URL, client build failure)
    #[error("directory client misconfigured: {0}")]
    Config(String),
}

/// Errors from a geolocation lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    /// Could not reach the service or read its response
    #[error("geolocation request failed: {0}")]
    Transport(String),
    /// Service answered with a non-success status
    #[error("geolocation of {address} returned HTTP {status}")]
    Status { address: String, status: u16 },
    /// Response body was not the expected JSON
    #[error("malformed geolocation response: {0}")]
    Decode(String),
    /// Response carried unusable coordinates
    #[error("invalid coordinates: {0}")]
    Coordinate(#[from] CoordinateError),
    /// Service answered but refused to locate the address
    #[error("geolocation of {address} rejected: {reason}")]
    Rejected { address: String, reason: String },
    /// Lookup did not finish before its deadline
    #[error("geolocation timed out after {0:?}")]
    Timeout(Duration),
    /// Adapter misconfiguration
    #[error("geolocation client misconfigured: {0}")]
    Config(String),
}
