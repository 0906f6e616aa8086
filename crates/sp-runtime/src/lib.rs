//! # Provider Locator Runtime
//!
//! Library half of the `provider-locator` binary, exposed for testing.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, file, environment)
//! 2. Install the log subscriber
//! 3. Build the HTTP adapters, the selection service and the gateway
//! 4. Serve until Ctrl+C

pub mod config;
pub mod logging;
pub mod wiring;

pub use config::{ConfigError, LocatorConfig};
pub use logging::{init_logging, LoggingError};
pub use wiring::{build_gateway, build_selection_service};
