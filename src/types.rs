//! Core types shared by the extractor and the reporter

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Stable identifier of a maildir message
///
/// Maildir encodes flags after a comma in the file name, so only the part
/// before the first comma identifies the message across flag changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id from a message path: its file name up to the first comma
    ///
    /// A file name starting with a comma gives the empty id.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let id = file_name.split(',').next().unwrap_or(file_name);
        Some(Self::new(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address with the display name it was seen with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Display name with quotes removed (may be empty)
    pub name: String,

    /// Lowercased email address (e.g., "john@example.com")
    pub address: String,
}

impl ParsedAddress {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Local part (before the first @)
    #[must_use]
    pub fn local_part(&self) -> &str {
        local_part(&self.address)
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} <{}>", self.name, self.address)
        }
    }
}

/// Text before the first `@` of an address
#[must_use]
pub fn local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or(address)
}

/// Fields pulled out of one message's header block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFields {
    /// Addresses from To, From, Cc and Bcc, in that order, duplicates kept
    pub addresses: Vec<ParsedAddress>,

    /// Seconds since the epoch, 0 when the date is missing or unparseable
    pub timestamp: i64,
}

/// Everything observed about one address across all scanned messages
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressEntry {
    /// Display names in observation order
    #[serde(default)]
    pub names: Vec<String>,

    /// Message timestamps in observation order
    #[serde(default, deserialize_with = "deserialize_dates")]
    pub dates: Vec<i64>,
}

/// Accept whole or fractional epoch seconds; fractions are truncated
#[allow(clippy::cast_possible_truncation)]
fn deserialize_dates<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Seconds(i64),
        Fractional(f64),
    }

    let dates = Vec::<Timestamp>::deserialize(deserializer)?;
    Ok(dates
        .into_iter()
        .map(|date| match date {
            Timestamp::Seconds(secs) => secs,
            Timestamp::Fractional(secs) => secs as i64,
        })
        .collect())
}

impl AddressEntry {
    /// Record one more sighting of this address
    pub fn push(&mut self, name: impl Into<String>, date: i64) {
        self.names.push(name.into());
        self.dates.push(date);
    }

    /// Number of sightings
    #[must_use]
    pub const fn frequency(&self) -> usize {
        self.dates.len()
    }

    /// Most recent sighting, 0 if none is dated
    #[must_use]
    pub fn recency(&self) -> i64 {
        self.dates.iter().copied().max().unwrap_or(0)
    }
}

/// Ordinal ranks of an address, 0 being best
///
/// Ranks are recomputed on every run and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ranks {
    pub frequency_rank: usize,
    pub recency_rank: usize,
}

impl Ranks {
    /// Weighted blend of both ranks; lower is more relevant
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn blended(&self, frequency_weight: f64) -> f64 {
        (self.frequency_rank as f64).mul_add(
            frequency_weight,
            (1.0 - frequency_weight) * self.recency_rank as f64,
        )
    }
}
