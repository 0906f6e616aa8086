//! Query-string parameters of the HTTP surface.
//!
//! Values arrive as raw strings so that malformed input is reported with
//! the gateway's own error body instead of the framework's.

use super::error::ApiError;
use serde::Deserialize;
use sp_01_provider_selection::{NetworkAddressLiteral, SelectionRequest};

/// `GET /api/providers?size_bytes=N[&source_ip=A]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersQuery {
    pub size_bytes: Option<String>,
    pub source_ip: Option<String>,
}

impl ProvidersQuery {
    /// Validate into a selection request.
    ///
    /// `size_bytes` is required. An absent or blank `source_ip` selects at
    /// random; anything else must be a dotted-quad IPv4 address.
    pub fn into_request(self) -> Result<SelectionRequest, ApiError> {
        let raw_size = self
            .size_bytes
            .ok_or_else(|| ApiError::invalid_request("size_bytes is required"))?;
        let size_bytes = raw_size.trim().parse::<u64>().map_err(|_| {
            ApiError::invalid_request(format!(
                "size_bytes must be a non-negative integer, got {raw_size:?}"
            ))
        })?;

        let origin = match self.source_ip.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NetworkAddressLiteral::parse(raw).map_err(|e| {
                ApiError::invalid_request(format!("source_ip {raw:?} is invalid: {e}"))
            })?),
        };

        Ok(SelectionRequest { size_bytes, origin })
    }
}

/// `GET /api/provider/info?addr=ID`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderInfoQuery {
    pub addr: Option<String>,
}

impl ProviderInfoQuery {
    pub fn provider_id(&self) -> Result<&str, ApiError> {
        match self.addr.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ApiError::invalid_request("addr is required")),
        }
    }
}
