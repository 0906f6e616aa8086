//! Transport address parsing
//!
//! Providers advertise libp2p multiaddrs such as `/ip4/203.0.113.5/tcp/4001`.
//! Geolocation only needs the IPv4 literal: the first `ip4` protocol segment,
//! validated as a dotted quad.

use super::errors::AddressError;
use std::fmt;
use std::str::FromStr;

/// Protocol name of the IPv4 segment in a multiaddr.
const IP4_PROTOCOL: &str = "ip4";

/// A validated dotted-quad address string, used as the geolocation key.
///
/// The parsed text is kept as-is: two literals are the same address only
/// when they are textually identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkAddressLiteral(String);

impl NetworkAddressLiteral {
    /// Validate `text` as four decimal octets (1-3 digits, 0..=255) joined by dots.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        if text.is_empty() {
            return Err(AddressError::Empty);
        }

        let octets: Vec<&str> = text.split('.').collect();
        if octets.len() != 4 {
            return Err(AddressError::OctetCount(octets.len()));
        }

        for octet in &octets {
            let well_formed = (1..=3).contains(&octet.len())
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u16>().map(|v| v <= 255).unwrap_or(false);
            if !well_formed {
                return Err(AddressError::InvalidOctet((*octet).to_string()));
            }
        }

        Ok(Self(text.to_string()))
    }

    /// The literal exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for NetworkAddressLiteral {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NetworkAddressLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NetworkAddressLiteral {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the IPv4 literal from a multiaddr.
///
/// Returns `None` when the address has no `ip4` segment (e.g. `/dns4/...` or
/// `/ip6/...`) or when the value after it is not a well-formed dotted quad.
/// Callers treat `None` as "skip this address", never as a fatal error.
pub fn extract_ip4(multiaddr: &str) -> Option<NetworkAddressLiteral> {
    let mut segments = multiaddr.split('/');
    while let Some(segment) = segments.next() {
        if segment == IP4_PROTOCOL {
            return segments
                .next()
                .and_then(|value| NetworkAddressLiteral::parse(value).ok());
        }
    }
    None
}
