use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

/// Maritime mobile service identity of a tracked vessel.
///
/// No range validation is done: zero and negative values are accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Mmsi(pub i32);

impl fmt::Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Mmsi {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Mmsi)
    }
}

/// Parses a comma separated list of vessel identifiers.
///
/// Tokens are trimmed before parsing. Tokens that are not integers are logged
/// and skipped; the relative order of the valid ones is kept.
pub fn parse_identifiers(raw: &str) -> Vec<Mmsi> {
    raw.split(',')
        .map(str::trim)
        .filter_map(|token| match token.parse::<Mmsi>() {
            Ok(mmsi) => Some(mmsi),
            Err(e) => {
                warn!("skipping invalid vessel identifier '{token}': {e}");
                None
            }
        })
        .collect()
}
