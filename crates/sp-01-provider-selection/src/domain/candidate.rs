//! Provider records and selection candidates
//!
//! The directory API reports providers as JSON records whose numeric fields
//! are strings. A [`Candidate`] is one record plus its parsed piece-size range;
//! the record itself is kept verbatim so callers get back exactly what the
//! directory said.

use super::address::{extract_ip4, NetworkAddressLiteral};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Upstream treats `null` and absent fields the same way.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Advertised transport addresses of a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Multiaddrs {
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
}

/// A storage provider record as published by the directory API.
///
/// Fields the selector needs are typed; everything else lands in `extra`
/// and is serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peer_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sector_size_bytes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_piece_size_bytes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_piece_size_bytes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_attofil: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_verified_attofil: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multiaddrs: Multiaddrs,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inclusive range of piece sizes (bytes) a provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceSizeRange {
    pub min_bytes: u64,
    pub max_bytes: u64,
}

impl PieceSizeRange {
    pub fn new(min_bytes: u64, max_bytes: u64) -> Self {
        Self {
            min_bytes,
            max_bytes,
        }
    }

    /// Parse the directory's string-encoded bounds. A field that does not
    /// parse as an unsigned integer counts as zero.
    pub fn parse_lenient(min_bytes: &str, max_bytes: &str) -> Self {
        Self::new(parse_bytes(min_bytes), parse_bytes(max_bytes))
    }

    /// `min <= size <= max`. An inverted range contains nothing.
    pub fn contains(&self, size_bytes: u64) -> bool {
        self.min_bytes <= size_bytes && size_bytes <= self.max_bytes
    }
}

fn parse_bytes(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}

/// An immutable snapshot of one provider, fetched for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    record: ProviderRecord,
    piece_size: PieceSizeRange,
}

impl Candidate {
    /// Build a candidate from explicit values.
    pub fn new(
        id: impl Into<String>,
        addresses: Vec<String>,
        min_piece_size_bytes: u64,
        max_piece_size_bytes: u64,
    ) -> Self {
        Self::from_record(ProviderRecord {
            id: id.into(),
            min_piece_size_bytes: min_piece_size_bytes.to_string(),
            max_piece_size_bytes: max_piece_size_bytes.to_string(),
            multiaddrs: Multiaddrs { addresses },
            ..ProviderRecord::default()
        })
    }

    /// Wrap a directory record, parsing its piece-size bounds.
    pub fn from_record(record: ProviderRecord) -> Self {
        let piece_size =
            PieceSizeRange::parse_lenient(&record.min_piece_size_bytes, &record.max_piece_size_bytes);
        Self { record, piece_size }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn addresses(&self) -> &[String] {
        &self.record.multiaddrs.addresses
    }

    pub fn piece_size(&self) -> PieceSizeRange {
        self.piece_size
    }

    pub fn record(&self) -> &ProviderRecord {
        &self.record
    }

    pub fn into_record(self) -> ProviderRecord {
        self.record
    }

    /// IPv4 literals of the advertised addresses, in advertised order.
    /// Addresses without a usable `ip4` segment are skipped.
    pub fn address_literals(&self) -> impl Iterator<Item = NetworkAddressLiteral> + '_ {
        self.addresses().iter().filter_map(|addr| extract_ip4(addr))
    }
}

impl From<ProviderRecord> for Candidate {
    fn from(record: ProviderRecord) -> Self {
        Self::from_record(record)
    }
}

/// Keep the candidates whose piece-size range contains `size_bytes`.
///
/// Bounds are inclusive. No match yields an empty vector, not an error.
pub fn filter_by_piece_size(
    candidates: impl IntoIterator<Item = Candidate>,
    size_bytes: u64,
) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.piece_size.contains(size_bytes))
        .collect()
}

/// Pick one candidate uniformly at random with the caller's generator.
pub fn select_random<'a, R>(candidates: &'a [Candidate], rng: &mut R) -> Option<&'a Candidate>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng)
}
