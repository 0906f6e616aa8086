//! Domain Errors for Provider Selection

use thiserror::Error;

/// Errors produced while validating a dotted-quad address literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input was empty
    #[error("address literal is empty")]
    Empty,
    /// Input did not split into exactly four octets
    #[error("expected 4 octets, found {0}")]
    OctetCount(usize),
    /// An octet was not a 1-3 digit decimal number in 0..=255
    #[error("invalid octet '{0}'")]
    InvalidOctet(String),
}

/// Errors produced while building a [`Coordinate`](super::Coordinate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// A combined "lat,lon" string did not contain both halves
    #[error("missing {0} component")]
    MissingComponent(&'static str),
    /// A component was not a valid floating point number
    #[error("invalid {component} '{text}'")]
    InvalidNumber {
        component: &'static str,
        text: String,
    },
    /// NaN or infinity
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
    /// Latitude outside [-90, 90]
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180]
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}
