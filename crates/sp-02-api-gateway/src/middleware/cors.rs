//! CORS middleware.
//!
//! Wrapper around tower-http CORS with gateway configuration. The surface is
//! read-only, so only `GET` is allowed.

use crate::domain::config::CorsConfig;
use axum::http::Method;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

/// Create CORS layer from gateway config, or `None` when disabled
pub fn create_cors_layer(config: &CorsConfig) -> Option<TowerCorsLayer> {
    if !config.enabled {
        return None;
    }

    let mut cors = TowerCorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
