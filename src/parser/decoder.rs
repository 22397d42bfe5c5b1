//! Location-history document decoding
//!
//! Reads the JSON export into [`RawSample`] values. Nothing is validated here
//! beyond the JSON shape; timestamps stay strings until normalization.

use crate::types::{LocationHistory, RawSample};
use crate::Result;
use log::debug;
use serde::Deserialize;
use std::io::Read;

/// Number of decoded samples echoed at debug level
const PREVIEW_SAMPLES: usize = 10;

/// Decode a location-history document from a reader.
///
/// Only the first JSON value in the stream is read; trailing bytes are
/// ignored. Fails without partial results if the document is not JSON or
/// has no `locations` array.
pub fn decode_location_history<R: Read>(reader: R) -> Result<Vec<RawSample>> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let history = LocationHistory::deserialize(&mut deserializer)?;

    debug!("Decoded {} location samples", history.locations.len());
    for (i, sample) in history.locations.iter().take(PREVIEW_SAMPLES).enumerate() {
        debug!("  [{i}] {sample:?}");
    }

    Ok(history.locations)
}

/// Decode a location-history document held in memory
pub fn decode_location_history_bytes(data: &[u8]) -> Result<Vec<RawSample>> {
    decode_location_history(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertError;

    #[test]
    fn test_decode_full_sample() {
        let json = br#"{"locations": [
            {"timestampMs": "1538989555956", "latitudeE7": 387093490, "longitudeE7": -91464230,
             "accuracy": 20, "source": "WIFI"}
        ]}"#;
        let samples = decode_location_history_bytes(json).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp_ms, "1538989555956");
        assert_eq!(samples[0].latitude_e7, Some(387093490));
        assert_eq!(samples[0].longitude_e7, Some(-91464230));
        assert_eq!(samples[0].accuracy, Some(20));
        assert_eq!(samples[0].source.as_deref(), Some("WIFI"));
    }

    #[test]
    fn test_decode_keeps_input_order_and_optional_fields() {
        let json = br#"{"locations": [
            {"timestampMs": "3000", "latitudeE7": 1, "longitudeE7": 2},
            {"timestampMs": "1000", "latitudeE7": 3, "longitudeE7": 4, "activity": []}
        ]}"#;
        let samples = decode_location_history_bytes(json).unwrap();
        let stamps: Vec<&str> = samples.iter().map(|s| s.timestamp_ms.as_str()).collect();
        assert_eq!(stamps, ["3000", "1000"]);
        assert_eq!(samples[1].accuracy, None);
        assert_eq!(samples[1].source, None);
    }

    #[test]
    fn test_decode_null_timestamp_is_kept_as_empty() {
        let json = br#"{"locations": [
            {"timestampMs": null, "latitudeE7": 1, "longitudeE7": 2},
            {"latitudeE7": 3, "longitudeE7": 4},
            {"timestampMs": "1000", "latitudeE7": 5, "longitudeE7": 6}
        ]}"#;
        let samples = decode_location_history_bytes(json).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].timestamp_ms, "");
        assert_eq!(samples[1].timestamp_ms, "");
        assert_eq!(samples[2].timestamp_ms, "1000");
    }

    #[test]
    fn test_decode_empty_array() {
        let samples = decode_location_history_bytes(br#"{"locations": []}"#).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_decode_ignores_trailing_data() {
        let samples = decode_location_history_bytes(br#"{"locations": []} trailing"#).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = decode_location_history_bytes(br#"{"locations": [ {"timestampMs": "#).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_missing_array() {
        let err = decode_location_history_bytes(br#"{"timelineObjects": []}"#).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let numeric_timestamp = br#"{"locations": [{"timestampMs": 1000, "latitudeE7": 1, "longitudeE7": 2}]}"#;
        assert!(decode_location_history_bytes(numeric_timestamp).is_err());

        let string_latitude = br#"{"locations": [{"timestampMs": "1000", "latitudeE7": "1", "longitudeE7": 2}]}"#;
        assert!(decode_location_history_bytes(string_latitude).is_err());

        let not_an_array = br#"{"locations": {}}"#;
        assert!(decode_location_history_bytes(not_an_array).is_err());
    }
}
