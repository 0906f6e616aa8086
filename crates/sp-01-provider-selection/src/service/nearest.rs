//! Nearest-provider search
//!
//! Flow:
//! 1. Resolve the origin (mandatory, fails the whole search).
//! 2. Enumerate (candidate, literal) pairs in input order.
//! 3. Resolve each distinct literal once, concurrently, in order-preserving
//!    batches bounded by `max_concurrent_lookups`.
//! 4. Replay the pairs in enumeration order through a `NearestTracker`.

use super::core::ProviderSelectionService;
use crate::domain::{
    lookup_targets, Candidate, Coordinate, NearestMatch, NearestTracker, NetworkAddressLiteral,
};
use crate::ports::SelectionError;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

impl ProviderSelectionService {
    /// Find the candidate whose advertised address is nearest to `origin`.
    ///
    /// Per-address extraction and lookup failures are skipped. Ties keep the
    /// pair enumerated first, regardless of which lookup finished first.
    pub async fn select_nearest<'a>(
        &self,
        origin: &NetworkAddressLiteral,
        candidates: &'a [Candidate],
    ) -> Result<NearestMatch<'a>, SelectionError> {
        let origin_position = self.locate_with_deadline(origin).await.map_err(|reason| {
            warn!(origin = %origin, error = %reason, "source address unresolvable");
            SelectionError::SourceUnresolvable {
                origin: origin.clone(),
                reason,
            }
        })?;

        let targets = lookup_targets(candidates, origin);

        let mut seen = HashSet::new();
        let distinct: Vec<NetworkAddressLiteral> = targets
            .iter()
            .map(|target| &target.literal)
            .filter(|literal| seen.insert(*literal))
            .cloned()
            .collect();

        debug!(
            origin = %origin,
            candidates = candidates.len(),
            addresses = targets.len(),
            lookups = distinct.len(),
            "resolving candidate addresses"
        );

        let resolved: HashMap<NetworkAddressLiteral, Coordinate> = stream::iter(distinct)
            .map(|literal| async move {
                let result = self.locate_with_deadline(&literal).await;
                (literal, result)
            })
            .buffered(self.config.concurrency())
            .filter_map(|(literal, result)| async move {
                match result {
                    Ok(position) => Some((literal, position)),
                    Err(error) => {
                        debug!(address = %literal, error = %error, "skipping unresolvable address");
                        None
                    }
                }
            })
            .collect()
            .await;

        let mut tracker = NearestTracker::new();
        for target in targets {
            if let Some(position) = resolved.get(&target.literal) {
                let distance_km = origin_position.distance_km(position);
                tracker.offer(target, distance_km);
            }
        }

        let (nearest, distance_km) = tracker
            .into_best()
            .ok_or_else(|| SelectionError::NoNearbyCandidate {
                origin: origin.clone(),
            })?;

        Ok(NearestMatch {
            candidate: nearest.candidate,
            literal: nearest.literal,
            distance_km,
        })
    }
}
