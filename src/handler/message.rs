//! Position report payloads
//!
//! Location updates arrive as GeoJSON-like objects:
//!
//! ```json
//! {"Mmsi":230123456,"type":"Feature",
//!  "geometry":{"type":"Point","coordinates":[24.9,60.2]},
//!  "Properties":{"Heading":120.0,"timestampExternal":1700000000}}
//! ```
//!
//! Field names are matched in both capitalised and lowercase form. Depending
//! on the feed revision `Heading` and `timestampExternal` sit either at the top
//! level or inside `Properties`; [`TimestampLayout`] selects which one is read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::tracking::Mmsi;
use crate::utils::error::DecodeError;

/// Where the timestamp and heading of a payload live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampLayout {
    /// Top-level fields.
    Flat,
    /// Inside the `Properties` object.
    #[default]
    Nested,
}

impl FromStr for TimestampLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(TimestampLayout::Flat),
            "nested" => Ok(TimestampLayout::Nested),
            other => Err(format!("unknown timestamp layout '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(rename = "Heading", alias = "heading")]
    heading: Option<f64>,
    #[serde(rename = "timestampExternal")]
    timestamp_external: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawPositionMessage {
    #[serde(rename = "Mmsi", alias = "mmsi")]
    mmsi: Mmsi,
    #[serde(rename = "type")]
    message_type: String,
    geometry: Geometry,
    #[serde(rename = "Heading", alias = "heading")]
    heading: Option<f64>,
    #[serde(rename = "timestampExternal")]
    timestamp_external: Option<i64>,
    #[serde(rename = "Properties", alias = "properties")]
    properties: Option<Properties>,
}

/// A decoded location update for one vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMessage {
    pub mmsi: Mmsi,
    pub message_type: String,
    pub geometry: Geometry,
    pub heading: Option<f64>,
    /// Seconds since the unix epoch.
    pub timestamp_external: Option<i64>,
}

impl PositionMessage {
    pub fn decode(payload: &[u8], layout: TimestampLayout) -> Result<Self, DecodeError> {
        let raw: RawPositionMessage = serde_json::from_slice(payload)?;

        let found = raw.geometry.coordinates.len();
        if found < 2 {
            return Err(DecodeError::MissingCoordinates(found));
        }

        let (heading, timestamp_external) = match layout {
            TimestampLayout::Flat => (raw.heading, raw.timestamp_external),
            TimestampLayout::Nested => {
                let properties = raw.properties.unwrap_or_default();
                (properties.heading, properties.timestamp_external)
            }
        };

        Ok(PositionMessage {
            mmsi: raw.mmsi,
            message_type: raw.message_type,
            geometry: raw.geometry,
            heading,
            timestamp_external,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.coordinates[1]
    }

    /// `None` when the payload carried no timestamp or it is out of range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_external
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl fmt::Display for PositionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of type {}", self.mmsi, self.message_type)
    }
}
