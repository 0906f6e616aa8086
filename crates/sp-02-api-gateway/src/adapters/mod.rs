//! Adapters for the API Gateway.
//!
//! Conversions between the selection subsystem, the domain error type and
//! axum responses.

pub mod error_conversions;
