//! Storage marketplace directory client
//!
//! Endpoints, relative to the configured base URL:
//! - `GET {base}/providers` → `{"storageProviders": [record, ...]}`
//! - `GET {base}/providers/{id}` → `{"0": record}`

use crate::domain::ProviderRecord;
use crate::ports::{DirectoryError, ProviderDirectory};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ProviderListing {
    #[serde(rename = "storageProviders", default)]
    storage_providers: Option<Vec<ProviderRecord>>,
}

#[derive(Debug, Deserialize)]
struct ProviderEnvelope {
    #[serde(rename = "0", default)]
    record: Option<ProviderRecord>,
}

/// Decode a provider listing body. A missing or `null` list is empty.
pub fn decode_listing(body: &[u8]) -> Result<Vec<ProviderRecord>, DirectoryError> {
    let listing: ProviderListing =
        serde_json::from_slice(body).map_err(|e| DirectoryError::Decode(e.to_string()))?;
    Ok(listing.storage_providers.unwrap_or_default())
}

/// Decode a single-provider body. An empty body or an envelope without a
/// record means the directory does not know the provider.
pub fn decode_provider(body: &[u8]) -> Result<Option<ProviderRecord>, DirectoryError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: ProviderEnvelope =
        serde_json::from_slice(body).map_err(|e| DirectoryError::Decode(e.to_string()))?;
    Ok(envelope.record)
}

/// [`ProviderDirectory`] over the marketplace HTTP API.
#[derive(Debug, Clone)]
pub struct HttpProviderDirectory {
    client: Client,
    base_url: Url,
}

impl HttpProviderDirectory {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Config(e.to_string()))?;
        Self::with_client(client, base_url)
    }

    /// Use an existing client (shared pool).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::Config(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL. Segments are percent-encoded,
    /// so a provider id can never escape its path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::Config(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and return the status and body.
    async fn fetch(&self, url: &Url) -> Result<(StatusCode, Vec<u8>), DirectoryError> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "directory request failed");
            DirectoryError::Transport(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "directory responded");
        Ok((status, body.to_vec()))
    }

    fn status_error(status: StatusCode, url: &Url) -> DirectoryError {
        warn!(url = %url, status = status.as_u16(), "directory returned error status");
        DirectoryError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl ProviderDirectory for HttpProviderDirectory {
    async fn list_providers(&self) -> Result<Vec<ProviderRecord>, DirectoryError> {
        let url = self.endpoint(&["providers"])?;
        let (status, body) = self.fetch(&url).await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        decode_listing(&body)
    }

    async fn get_provider(
        &self,
        provider_id: &str,
    ) -> Result<Option<ProviderRecord>, DirectoryError> {
        let url = self.endpoint(&["providers", provider_id])?;
        let (status, body) = self.fetch(&url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        decode_provider(&body)
    }
}
