//! SP-02 API Gateway - HTTP interface of the storage provider locator.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (sp-02)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  GET /api/providers   GET /api/provider/info   /health   │
//! │         │                     │                          │
//! │  ┌──────┴─────────────────────┴──────┐                   │
//! │  │          Middleware Stack          │                   │
//! │  │  Tracing → CORS → request deadline │                   │
//! │  └─────────────────┬──────────────────┘                   │
//! │                    │ query validation                     │
//! └────────────────────┼─────────────────────────────────────┘
//!                      ▼
//!          ProviderSelectionApi (sp-01)
//! ```
//!
//! # Status Mapping
//!
//! - **400**: missing or malformed `size_bytes`, malformed `source_ip`,
//!   missing `addr`
//! - **404**: no provider accepts the size, no candidate could be located,
//!   unknown provider id
//! - **500**: directory or source-address geolocation failure, or the
//!   request deadline (`request_timeout`) expiring
//!
//! # Usage
//!
//! ```ignore
//! use sp_02_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), selection_api)?;
//! service.start(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod service;

// Re-exports for public API
pub use domain::config::{duration_serde, ConfigError, CorsConfig, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::{ProviderInfoQuery, ProvidersQuery, RequestId};
pub use middleware::REQUEST_ID_HEADER;
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
