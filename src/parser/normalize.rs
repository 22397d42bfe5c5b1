//! Conversion of raw samples into a filtered [`Track`]

use crate::conversion::{convert_e7_coordinate, convert_timestamp_millis};
use crate::error::RecordError;
use crate::filters::{classify, FilterDecision, ScanPolicy};
use crate::types::{CanonicalLocation, DateRange, RawSample, Track};
use chrono::{DateTime, Utc};
use log::{debug, trace, warn};

/// Normalize decoded samples and keep those strictly inside `range`.
///
/// Samples with an unparseable timestamp or a missing coordinate are
/// skipped and reported in [`Track::skipped`]; they never abort the batch.
/// Retained locations keep their input order and are numbered from 0.
pub fn normalize(samples: &[RawSample], range: &DateRange, policy: ScanPolicy) -> Track {
    debug!(
        "Filtering {} samples to ({}, {}) with {:?} scan",
        samples.len(),
        range.start(),
        range.end(),
        policy
    );

    let mut locations = Vec::with_capacity(samples.len());
    let mut skipped = Vec::new();

    for (index, sample) in samples.iter().enumerate() {
        let (timestamp, lat_e7, lon_e7) = match validate_sample(index, sample) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Skipping {e}");
                skipped.push(e);
                continue;
            }
        };

        match classify(range, timestamp, policy) {
            FilterDecision::Keep => {}
            FilterDecision::Skip => continue,
            FilterDecision::Stop => {
                debug!(
                    "Record {index} at {timestamp} is past the range, ignoring {} remaining samples",
                    samples.len() - index - 1
                );
                break;
            }
        }

        let location = CanonicalLocation {
            timestamp,
            latitude: convert_e7_coordinate(lat_e7),
            longitude: convert_e7_coordinate(lon_e7),
            sequence: locations.len(),
        };
        trace!(
            "[{}] {} {:.6} {:.6}",
            location.sequence,
            location.timestamp,
            location.latitude,
            location.longitude
        );
        locations.push(location);
    }

    debug!(
        "Kept {} of {} samples ({} malformed)",
        locations.len(),
        samples.len(),
        skipped.len()
    );

    Track::new(*range, locations, skipped)
}

fn validate_sample(
    index: usize,
    sample: &RawSample,
) -> Result<(DateTime<Utc>, i64, i64), RecordError> {
    let millis = sample
        .timestamp_ms
        .parse::<i64>()
        .map_err(|source| RecordError::InvalidTimestamp {
            index,
            value: sample.timestamp_ms.clone(),
            source,
        })?;

    let timestamp = convert_timestamp_millis(millis)
        .ok_or(RecordError::TimestampOutOfRange { index, millis })?;

    match (sample.latitude_e7, sample.longitude_e7) {
        (Some(lat), Some(lon)) => Ok((timestamp, lat, lon)),
        _ => Err(RecordError::MissingCoordinate { index }),
    }
}
