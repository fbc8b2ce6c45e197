//! Well-known types used by the contract.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Inventory result: status name mapped to a count.
///
/// Sparse map semantics: a status with no matching entries is omitted,
/// never emitted as zero. Ordered so marshalled output is deterministic.
pub type Inventory = BTreeMap<String, i64>;

/// A point in time, carried on the wire as RFC 3339 text with a `Z`
/// offset. Binding from text is the exact inverse of serialization, so
/// bind-then-marshal is the identity on well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Parse from RFC 3339 text, normalizing to UTC.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(text).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Render as RFC 3339 with a `Z` offset. Sub-second precision is
    /// kept only when the value carries it, so parse/render round-trip.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Timestamp::parse("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_timestamp_normalizes_offset_to_utc() {
        let ts = Timestamp::parse("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_serializes_as_string() {
        let ts = Timestamp::parse("2024-01-15T10:30:00Z").unwrap();
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json, serde_json::json!("2024-01-15T10:30:00Z"));
    }
}
