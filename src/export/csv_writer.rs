//! CSV rendering of a [`Track`]

use crate::conversion::{format_degrees, format_utc_date, format_utc_time};
use crate::types::Track;
use crate::Result;
use std::io::Write;

/// Column names, always written as the first record
pub const CSV_HEADER: [&str; 5] = ["No", "Latitude", "Longitude", "UTC date", "UTC time"];

/// Write `track` as CSV.
///
/// Returns the number of data rows written. Rows already flushed to `writer`
/// stay there if a later write fails.
pub fn write_csv<W: Write>(writer: W, track: &Track) -> Result<usize> {
    let mut csv_out = csv::Writer::from_writer(writer);
    csv_out.write_record(CSV_HEADER)?;

    for loc in track.locations() {
        csv_out.write_record([
            (loc.sequence + 1).to_string(),
            format_degrees(loc.latitude),
            format_degrees(loc.longitude),
            format_utc_date(&loc.timestamp),
            format_utc_time(&loc.timestamp),
        ])?;
    }

    csv_out.flush().map_err(csv::Error::from)?;
    Ok(track.len())
}
