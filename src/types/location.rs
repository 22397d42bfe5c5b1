use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::RecordError;
use crate::types::DateRange;

/// Top-level shape of a location-history export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationHistory {
    pub locations: Vec<RawSample>,
}

/// One location record exactly as it appears in the export.
///
/// Coordinates are degrees scaled by 10^7. `accuracy` and `source` are
/// carried through decoding but not used by the encoders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    /// Absent or `null` timestamps decode as `""` and fail per record later
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp_ms: String,
    #[serde(rename = "latitudeE7")]
    pub latitude_e7: Option<i64>,
    #[serde(rename = "longitudeE7")]
    pub longitude_e7: Option<i64>,
    pub accuracy: Option<i64>,
    pub source: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated location in degrees with a UTC timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalLocation {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// 0-based position in the normalized sequence. CSV row numbers and GPX
    /// waypoint names are derived from this, not from output loop counters.
    pub sequence: usize,
}

/// Normalized locations that fall inside a date range.
///
/// Only [`crate::parser::normalize`] builds a `Track`, so every location in
/// it already satisfies `range.contains(timestamp)`.
#[derive(Debug, Clone)]
pub struct Track {
    range: DateRange,
    locations: Vec<CanonicalLocation>,
    skipped: Vec<RecordError>,
}

impl Track {
    pub(crate) fn new(
        range: DateRange,
        locations: Vec<CanonicalLocation>,
        skipped: Vec<RecordError>,
    ) -> Self {
        Self {
            range,
            locations,
            skipped,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn locations(&self) -> &[CanonicalLocation] {
        &self.locations
    }

    /// Records that could not be normalized
    pub fn skipped(&self) -> &[RecordError] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
