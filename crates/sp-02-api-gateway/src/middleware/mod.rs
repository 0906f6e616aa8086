//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Tracing → CORS → Handler (request deadline)

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::{TracingLayer, REQUEST_ID_HEADER};
