//! Serde format for entity timestamps
//!
//! Timestamps are naive UTC and written with microsecond precision, e.g.
//! `2017-03-25T02:17:06.000003`. Use with `#[serde(with = "hbnb_types::timestamp")]`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Output format
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Input format (fraction optional)
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Parse a timestamp in the entity dict format
pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, PARSE_FORMAT)
}
