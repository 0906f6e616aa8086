//! Selection tuning knobs

use std::time::Duration;

/// Configuration for the provider selection service.
///
/// - `lookup_timeout`: deadline applied to every geolocation lookup. A lookup
///   that misses it is treated exactly like a failed lookup.
/// - `max_concurrent_lookups`: how many candidate lookups may be in flight at
///   once. Results are still reduced in enumeration order.
/// - `random_seed`: when set, every request seeds its fallback generator with
///   this value; otherwise each request seeds from OS entropy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    pub lookup_timeout: Duration,
    pub max_concurrent_lookups: usize,
    pub random_seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(5),
            max_concurrent_lookups: 8,
            random_seed: None,
        }
    }
}

impl SelectionConfig {
    /// Create a config suitable for testing (short deadline, fixed seed)
    pub fn for_testing() -> Self {
        Self {
            lookup_timeout: Duration::from_millis(100),
            max_concurrent_lookups: 4,
            random_seed: Some(42),
        }
    }

    /// Concurrency bound, never below one.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_lookups.max(1)
    }
}
