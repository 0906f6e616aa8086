//! Error conversions from infrastructure types.
//!
//! These conversions involve HTTP framework types and belong in the adapters
//! layer.

use crate::domain::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sp_01_provider_selection::SelectionError;
use tracing::warn;

impl From<SelectionError> for ApiError {
    fn from(e: SelectionError) -> Self {
        if e.is_not_found() {
            ApiError::not_found(e.to_string())
        } else {
            warn!(error = %e, "selection failed upstream");
            ApiError::upstream(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
