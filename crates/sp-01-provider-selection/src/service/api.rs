use super::core::ProviderSelectionService;
use crate::domain::{filter_by_piece_size, select_random, Candidate, ProviderRecord};
use crate::ports::{ProviderSelectionApi, SelectionError, SelectionRequest};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl ProviderSelectionApi for ProviderSelectionService {
    async fn select_provider(&self, request: SelectionRequest) -> Result<Candidate, SelectionError> {
        let records = self.directory.list_providers().await?;
        let total = records.len();

        let eligible = filter_by_piece_size(
            records.into_iter().map(Candidate::from_record),
            request.size_bytes,
        );
        debug!(
            total,
            eligible = eligible.len(),
            size_bytes = request.size_bytes,
            "applied piece size filter"
        );

        if eligible.is_empty() {
            return Err(SelectionError::NoProvidersFound {
                size_bytes: request.size_bytes,
            });
        }

        match &request.origin {
            Some(origin) => {
                let nearest = self.select_nearest(origin, &eligible).await?;
                info!(
                    provider = nearest.candidate.id(),
                    address = %nearest.literal,
                    distance_km = nearest.distance_km,
                    origin = %origin,
                    "selected nearest provider"
                );
                Ok(nearest.candidate.clone())
            }
            None => {
                let mut rng = self.request_rng();
                let chosen = select_random(&eligible, &mut rng)
                    .cloned()
                    .ok_or(SelectionError::NoProvidersFound {
                        size_bytes: request.size_bytes,
                    })?;
                info!(provider = chosen.id(), "selected random provider");
                Ok(chosen)
            }
        }
    }

    async fn provider_info(&self, provider_id: &str) -> Result<ProviderRecord, SelectionError> {
        self.directory
            .get_provider(provider_id)
            .await?
            .ok_or_else(|| SelectionError::ProviderNotFound {
                provider_id: provider_id.to_string(),
            })
    }
}
