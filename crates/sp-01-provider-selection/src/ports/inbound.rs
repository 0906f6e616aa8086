//! # Driving Ports (Inbound API)
//!
//! The API this subsystem exposes to the gateway.

use super::outbound::{DirectoryError, GeolocationError};
use crate::domain::{Candidate, NetworkAddressLiteral, ProviderRecord};
use async_trait::async_trait;
use thiserror::Error;

/// A request for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Piece size the provider must accept, in bytes
    pub size_bytes: u64,
    /// When present, prefer the provider nearest to this address
    pub origin: Option<NetworkAddressLiteral>,
}

impl SelectionRequest {
    /// Any provider accepting `size_bytes`.
    pub fn any(size_bytes: u64) -> Self {
        Self {
            size_bytes,
            origin: None,
        }
    }

    /// The provider accepting `size_bytes` nearest to `origin`.
    pub fn nearest_to(size_bytes: u64, origin: NetworkAddressLiteral) -> Self {
        Self {
            size_bytes,
            origin: Some(origin),
        }
    }
}

/// Errors returned by [`ProviderSelectionApi`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The directory could not be read
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// No provider accepts the requested piece size
    #[error("no providers found for piece size {size_bytes}")]
    NoProvidersFound { size_bytes: u64 },
    /// The caller's own address could not be geolocated
    #[error("source address {origin} unresolvable: {reason}")]
    SourceUnresolvable {
        origin: NetworkAddressLiteral,
        #[source]
        reason: GeolocationError,
    },
    /// Every candidate address failed extraction or geolocation
    #[error("no nearby provider found for {origin}")]
    NoNearbyCandidate { origin: NetworkAddressLiteral },
    /// The directory does not know the requested provider
    #[error("provider {provider_id} not found")]
    ProviderNotFound { provider_id: String },
}

impl SelectionError {
    /// Empty-result outcomes, as opposed to upstream or parse failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoProvidersFound { .. }
                | Self::NoNearbyCandidate { .. }
                | Self::ProviderNotFound { .. }
        )
    }
}

/// Primary API for provider selection.
#[async_trait]
pub trait ProviderSelectionApi: Send + Sync {
    /// Pick one provider for `request`.
    ///
    /// Fetches the directory, keeps providers whose piece-size range contains
    /// `request.size_bytes`, then picks the nearest one to `request.origin`
    /// or, without an origin, a random one.
    async fn select_provider(&self, request: SelectionRequest) -> Result<Candidate, SelectionError>;

    /// Fetch one provider's record straight from the directory.
    async fn provider_info(&self, provider_id: &str) -> Result<ProviderRecord, SelectionError>;
}
