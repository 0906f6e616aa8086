//! Geographic coordinates and great-circle distance
//!
//! Geolocation APIs report positions in two shapes: a combined `"lat,lon"`
//! string, or separate latitude/longitude fields. Both shapes funnel into
//! [`Coordinate::from_degrees`], which owns the range checks.

use super::errors::CoordinateError;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite and out-of-range values.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() {
            return Err(CoordinateError::NonFinite("latitude"));
        }
        if !longitude.is_finite() {
            return Err(CoordinateError::NonFinite("longitude"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse separate latitude and longitude texts.
    pub fn from_components(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        let lat = parse_component("latitude", latitude)?;
        let lon = parse_component("longitude", longitude)?;
        Self::from_degrees(lat, lon)
    }

    /// Parse a combined `"lat,lon"` string (ipinfo `loc` field).
    pub fn parse_pair(text: &str) -> Result<Self, CoordinateError> {
        let mut parts = text.splitn(2, ',');
        let latitude = parts
            .next()
            .filter(|s| !s.trim().is_empty())
            .ok_or(CoordinateError::MissingComponent("latitude"))?;
        let longitude = parts
            .next()
            .ok_or(CoordinateError::MissingComponent("longitude"))?;
        Self::from_components(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        great_circle_distance(self, other)
    }
}

fn parse_component(component: &'static str, text: &str) -> Result<f64, CoordinateError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::InvalidNumber {
            component,
            text: text.to_string(),
        })
}

/// Haversine distance between two coordinates, in kilometers.
///
/// Symmetric and zero for identical points.
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let half_chord = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push the term marginally past 1 for antipodal points.
    let half_chord = half_chord.clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_KM * angle
}
