//! API Gateway error types.
//!
//! Every failed request is answered with an HTTP status and a JSON body of
//! the form `{"error": {"code": "...", "message": "..."}}`.

use serde::{Serialize, Serializer};
use std::fmt;

/// Machine-readable error codes carried in the response body
pub mod codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const UPSTREAM_ERROR: &str = "upstream_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// HTTP API error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Error code from [`codes`]
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Malformed or missing query parameter (400)
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(400, codes::INVALID_REQUEST, details)
    }

    /// Nothing matched (404)
    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(404, codes::NOT_FOUND, details)
    }

    /// A collaborator failed (500)
    pub fn upstream(details: impl Into<String>) -> Self {
        Self::new(500, codes::UPSTREAM_ERROR, details)
    }

    /// Internal error (500)
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(500, codes::INTERNAL_ERROR, details)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Body<'a> {
            code: &'a str,
            message: &'a str,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            error: Body<'a>,
        }

        Envelope {
            error: Body {
                code: self.code,
                message: &self.message,
            },
        }
        .serialize(serializer)
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
