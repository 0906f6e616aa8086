//! Domain types for the API Gateway.
//!
//! Configuration, error bodies, and query-parameter validation. Nothing here
//! touches the network.

pub mod config;
pub mod correlation;
pub mod error;
pub mod query;

// Re-exports for convenience
pub use config::{duration_serde, ConfigError, CorsConfig, GatewayConfig};
pub use correlation::RequestId;
pub use error::{codes, ApiError, ApiResult, GatewayError};
pub use query::{ProviderInfoQuery, ProvidersQuery};
