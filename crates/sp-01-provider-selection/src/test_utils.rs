//! In-memory port implementations for tests.
//!
//! The geolocator records every call so tests can assert on lookup counts,
//! ordering and concurrency.

use crate::domain::{Coordinate, NetworkAddressLiteral, ProviderRecord};
use crate::ports::{DirectoryError, GeolocationError, Geolocator, ProviderDirectory};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Directory serving a fixed list of records, or a fixed error.
#[derive(Debug, Default)]
pub struct InMemoryProviderDirectory {
    records: Vec<ProviderRecord>,
    failure: Option<DirectoryError>,
}

impl InMemoryProviderDirectory {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A directory whose every call fails with `error`.
    pub fn failing(error: DirectoryError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn begin_call(&self) -> Result<(), DirectoryError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProviderDirectory for InMemoryProviderDirectory {
    async fn list_providers(&self) -> Result<Vec<ProviderRecord>, DirectoryError> {
        self.begin_call()?;
        Ok(self.records.clone())
    }

    async fn get_provider(
        &self,
        provider_id: &str,
    ) -> Result<Option<ProviderRecord>, DirectoryError> {
        self.begin_call()?;
        Ok(self.records.iter().find(|r| r.id == provider_id).cloned())
    }
}

/// Geolocator answering from a table.
///
/// Unknown addresses fail with [`GeolocationError::Rejected`]. Per-address
/// delays let tests make later lookups finish first.
#[derive(Debug, Default)]
pub struct StaticGeolocator {
    positions: HashMap<String, Coordinate>,
    delays: HashMap<String, Duration>,
    lookups: Mutex<Vec<String>>,
    in_flight: Mutex<InFlight>,
}

#[derive(Debug, Default)]
struct InFlight {
    current: usize,
    peak: usize,
}

/// Counts one lookup as in flight until dropped, including when a deadline
/// cancels it.
struct InFlightGuard<'a>(&'a Mutex<InFlight>);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a Mutex<InFlight>) -> Self {
        let mut state = counter.lock();
        state.current += 1;
        state.peak = state.peak.max(state.current);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().current -= 1;
    }
}

impl StaticGeolocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a position. Out-of-range degrees are ignored, which leaves
    /// the address unresolvable.
    pub fn with_location(mut self, address: &str, latitude: f64, longitude: f64) -> Self {
        if let Ok(position) = Coordinate::from_degrees(latitude, longitude) {
            self.positions.insert(address.to_string(), position);
        }
        self
    }

    /// Delay every lookup of `address` by `delay`.
    pub fn with_delay(mut self, address: &str, delay: Duration) -> Self {
        self.delays.insert(address.to_string(), delay);
        self
    }

    /// Addresses looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().len()
    }

    /// Highest number of lookups that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.lock().peak
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn locate(
        &self,
        address: &NetworkAddressLiteral,
    ) -> Result<Coordinate, GeolocationError> {
        self.lookups.lock().push(address.to_string());
        let _in_flight = InFlightGuard::enter(&self.in_flight);

        if let Some(delay) = self.delays.get(address.as_str()) {
            tokio::time::sleep(*delay).await;
        }

        self.positions
            .get(address.as_str())
            .copied()
            .ok_or_else(|| GeolocationError::Rejected {
                address: address.to_string(),
                reason: "unknown address".to_string(),
            })
    }
}
