//! # Subsystem Wiring
//!
//! Builds the concrete adapters from configuration and plugs them into the
//! selection service and the gateway.
//!
//! ```text
//! HttpProviderDirectory ─┐
//!                        ├─→ ProviderSelectionService ─→ ApiGatewayService
//! HttpGeolocator ────────┘
//! ```

use crate::config::LocatorConfig;
use anyhow::{Context, Result};
use sp_01_provider_selection::{HttpGeolocator, HttpProviderDirectory, ProviderSelectionService};
use sp_02_api_gateway::ApiGatewayService;
use std::sync::Arc;
use tracing::info;

/// Build the selection service over the HTTP adapters.
pub fn build_selection_service(config: &LocatorConfig) -> Result<ProviderSelectionService> {
    let directory = HttpProviderDirectory::new(
        &config.directory.base_url,
        config.directory.request_timeout,
    )
    .context("failed to build provider directory client")?;

    let geolocator = HttpGeolocator::new(
        config.geolocation.url_template.clone(),
        config.geolocation.token.clone(),
        config.geolocation.request_timeout,
    )
    .context("failed to build geolocation client")?;

    info!(
        directory = %config.directory.base_url,
        geolocation = %config.geolocation.url_template,
        token = config.geolocation.token.is_some(),
        "upstream clients ready"
    );

    Ok(ProviderSelectionService::new(
        Arc::new(directory),
        Arc::new(geolocator),
        config.selection_config(),
    ))
}

/// Build the gateway serving the selection service.
pub fn build_gateway(config: &LocatorConfig) -> Result<ApiGatewayService> {
    let selection = build_selection_service(config)?;
    ApiGatewayService::new(config.http.clone(), Arc::new(selection))
        .context("failed to build API gateway")
}
