use crate::domain::{Coordinate, NetworkAddressLiteral, SelectionConfig};
use crate::ports::{GeolocationError, Geolocator, ProviderDirectory};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;

/// Provider Selection Service implementing the driving port.
///
/// # Example
///
/// ```rust,ignore
/// use sp_01_provider_selection::{
///     HttpGeolocator, HttpProviderDirectory, ProviderSelectionApi,
///     ProviderSelectionService, SelectionConfig, SelectionRequest,
/// };
///
/// let service = ProviderSelectionService::new(
///     Arc::new(directory),
///     Arc::new(geolocator),
///     SelectionConfig::default(),
/// );
///
/// let provider = service.select_provider(SelectionRequest::any(1 << 20)).await?;
/// ```
pub struct ProviderSelectionService {
    pub(crate) directory: Arc<dyn ProviderDirectory>,
    pub(crate) geolocator: Arc<dyn Geolocator>,
    pub(crate) config: SelectionConfig,
}

impl fmt::Debug for ProviderSelectionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSelectionService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProviderSelectionService {
    /// Create a new provider selection service.
    ///
    /// # Arguments
    ///
    /// * `directory` - Source of provider records
    /// * `geolocator` - IP geolocation lookup
    /// * `config` - Deadlines, concurrency bound and random seed
    pub fn new(
        directory: Arc<dyn ProviderDirectory>,
        geolocator: Arc<dyn Geolocator>,
        config: SelectionConfig,
    ) -> Self {
        Self {
            directory,
            geolocator,
            config,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Resolve one address under the configured deadline.
    ///
    /// A missed deadline is reported as [`GeolocationError::Timeout`] and is
    /// handled like any other lookup failure.
    pub(crate) async fn locate_with_deadline(
        &self,
        address: &NetworkAddressLiteral,
    ) -> Result<Coordinate, GeolocationError> {
        let deadline = self.config.lookup_timeout;
        match tokio::time::timeout(deadline, self.geolocator.locate(address)).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout(deadline)),
        }
    }

    /// Fresh generator for the random fallback, scoped to one request.
    pub(crate) fn request_rng(&self) -> StdRng {
        match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
