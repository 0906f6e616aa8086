//! Nearest-candidate reduction
//!
//! The service resolves addresses (possibly concurrently), then replays the
//! results here in enumeration order. Keeping the reduction separate from the
//! lookups makes the tie-break independent of lookup completion order.

use super::address::NetworkAddressLiteral;
use super::candidate::Candidate;

/// One address to resolve, tagged with the candidate that advertised it.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTarget<'a> {
    pub candidate: &'a Candidate,
    pub literal: NetworkAddressLiteral,
}

/// Enumerate every (candidate, literal) pair in input order.
///
/// Candidates are visited in slice order and addresses in advertised order.
/// Literals textually identical to `origin` are skipped, as are addresses
/// without a usable `ip4` segment.
pub fn lookup_targets<'a>(
    candidates: &'a [Candidate],
    origin: &NetworkAddressLiteral,
) -> Vec<LookupTarget<'a>> {
    candidates
        .iter()
        .flat_map(move |candidate| {
            candidate
                .address_literals()
                .filter(move |literal| literal != origin)
                .map(move |literal| LookupTarget { candidate, literal })
        })
        .collect()
}

/// Running minimum over distances.
///
/// The first offer initializes the minimum; later offers replace it only when
/// strictly smaller, so ties keep the earliest offer.
#[derive(Debug)]
pub struct NearestTracker<T> {
    best: Option<(T, f64)>,
}

impl<T> Default for NearestTracker<T> {
    fn default() -> Self {
        Self { best: None }
    }
}

impl<T> NearestTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an item; returns `true` if it became the new minimum.
    /// NaN distances are ignored.
    pub fn offer(&mut self, item: T, distance_km: f64) -> bool {
        if distance_km.is_nan() {
            return false;
        }
        let replace = match &self.best {
            None => true,
            Some((_, best)) => distance_km < *best,
        };
        if replace {
            self.best = Some((item, distance_km));
        }
        replace
    }

    pub fn into_best(self) -> Option<(T, f64)> {
        self.best
    }
}

/// Outcome of a nearest-provider search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestMatch<'a> {
    pub candidate: &'a Candidate,
    pub literal: NetworkAddressLiteral,
    pub distance_km: f64,
}
