//! IP geolocation client
//!
//! Works against any service addressed by a URL template with an `{ip}`
//! placeholder. Two response shapes are understood:
//! - ipinfo style: `{"loc": "48.8566,2.3522"}`
//! - ip-api style: `{"status": "success", "lat": 48.85, "lon": 2.35}`
//!   (`latitude`/`longitude` are accepted too, as numbers or strings)

use crate::domain::{Coordinate, CoordinateError, NetworkAddressLiteral};
use crate::ports::{GeolocationError, Geolocator};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Placeholder replaced by the looked-up address.
pub const IP_PLACEHOLDER: &str = "{ip}";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn resolve(self, component: &'static str) -> Result<f64, CoordinateError> {
        match self {
            Degrees::Number(value) => Ok(value),
            Degrees::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| CoordinateError::InvalidNumber { component, text })
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LocationPayload {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    bogon: bool,
    #[serde(default)]
    loc: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<Degrees>,
    #[serde(default, alias = "longitude")]
    lon: Option<Degrees>,
}

/// Decode a geolocation response body into a coordinate.
///
/// A combined `loc` string wins over separate fields. A service-reported
/// failure (`"status": "fail"`) or a reserved-range marker (`"bogon": true`)
/// is a rejection.
pub fn decode_location(body: &[u8], address: &str) -> Result<Coordinate, GeolocationError> {
    let payload: LocationPayload =
        serde_json::from_slice(body).map_err(|e| GeolocationError::Decode(e.to_string()))?;

    if payload
        .status
        .as_deref()
        .is_some_and(|status| status.eq_ignore_ascii_case("fail"))
    {
        return Err(GeolocationError::Rejected {
            address: address.to_string(),
            reason: payload.message.unwrap_or_else(|| "lookup failed".to_string()),
        });
    }
    if payload.bogon {
        return Err(GeolocationError::Rejected {
            address: address.to_string(),
            reason: "reserved address range".to_string(),
        });
    }

    if let Some(loc) = payload.loc {
        return Ok(Coordinate::parse_pair(&loc)?);
    }

    let latitude = payload
        .lat
        .ok_or(CoordinateError::MissingComponent("latitude"))?
        .resolve("latitude")?;
    let longitude = payload
        .lon
        .ok_or(CoordinateError::MissingComponent("longitude"))?
        .resolve("longitude")?;
    Ok(Coordinate::from_degrees(latitude, longitude)?)
}

/// [`Geolocator`] over an HTTP geolocation API.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    url_template: String,
    token: Option<String>,
}

impl HttpGeolocator {
    pub fn new(
        url_template: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeolocationError::Config(e.to_string()))?;
        Self::with_client(client, url_template, token)
    }

    /// Use an existing client (shared pool).
    ///
    /// The template must contain `{ip}` and form a valid URL once an
    /// address is substituted.
    pub fn with_client(
        client: Client,
        url_template: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, GeolocationError> {
        let url_template = url_template.into();
        if !url_template.contains(IP_PLACEHOLDER) {
            return Err(GeolocationError::Config(format!(
                "URL template {url_template} has no {IP_PLACEHOLDER} placeholder"
            )));
        }
        let geolocator = Self {
            client,
            url_template,
            token: token.filter(|t| !t.is_empty()),
        };
        geolocator.lookup_url("0.0.0.0")?;
        Ok(geolocator)
    }

    fn lookup_url(&self, address: &str) -> Result<Url, GeolocationError> {
        let raw = self.url_template.replace(IP_PLACEHOLDER, address);
        let mut url = Url::parse(&raw)
            .map_err(|e| GeolocationError::Config(format!("invalid lookup URL {raw}: {e}")))?;
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(url)
    }
}

#[async_trait]
impl Geolocator for HttpGeolocator {
    async fn locate(
        &self,
        address: &NetworkAddressLiteral,
    ) -> Result<Coordinate, GeolocationError> {
        let url = self.lookup_url(address.as_str())?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeolocationError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Status {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| GeolocationError::Transport(e.to_string()))?;

        let position = decode_location(&body, address.as_str())?;
        debug!(
            address = %address,
            latitude = position.latitude(),
            longitude = position.longitude(),
            "geolocated address"
        );
        Ok(position)
    }
}
