//! GPX 1.0 rendering of a [`Track`]
//!
//! Output layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <gpx version="1.0" creator="phototag" xmlns="http://www.topografix.com/GPX/1/0">
//!     <time>2021-08-17T23:50:25.01Z</time>
//!     <bounds minlat="38.707051" minlon="-9.147488" maxlat="38.714079" maxlon="-9.12705"/>
//!     <trk>
//!         <trkseg>
//!             <trkpt lat="38.709349" lon="-9.146423">
//!                 <time>2018-10-08T09:05:55.956Z</time>
//!                 <name>WPT.0</name>
//!             </trkpt>
//!         </trkseg>
//!     </trk>
//! </gpx>
//! ```
//!
//! Nesting is indented with one tab per level.

use crate::conversion::format_rfc3339;
use crate::error::ConvertError;
use crate::types::{BoundingRectangle, CanonicalLocation, Track};
use crate::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::Write;

pub const GPX_VERSION: &str = "1.0";
pub const GPX_CREATOR: &str = "phototag";
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/0";

fn encode_error<E: Display>(err: E) -> ConvertError {
    ConvertError::Encode(err.to_string())
}

/// Bounding rectangle of every location in `track`
pub fn track_bounds(track: &Track) -> BoundingRectangle {
    let mut bounds = BoundingRectangle::new();
    for loc in track.locations() {
        bounds.extend(loc.latitude, loc.longitude);
    }
    bounds
}

/// Write `track` as a GPX document stamped with `generated_at`.
///
/// Returns the number of `trkpt` elements written. An empty track still
/// produces a complete document with an empty `trkseg` and zero bounds.
pub fn write_gpx<W: Write>(writer: W, track: &Track, generated_at: DateTime<Utc>) -> Result<usize> {
    let mut w = Writer::new_with_indent(writer, b'\t', 1);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_error)?;

    let mut gpx = BytesStart::new("gpx");
    gpx.push_attribute(("version", GPX_VERSION));
    gpx.push_attribute(("creator", GPX_CREATOR));
    gpx.push_attribute(("xmlns", GPX_NAMESPACE));
    w.write_event(Event::Start(gpx)).map_err(encode_error)?;

    write_text_element(&mut w, "time", &format_rfc3339(&generated_at))?;

    let bounds = track_bounds(track).finalized();
    let mut bounds_elem = BytesStart::new("bounds");
    bounds_elem.push_attribute(("minlat", bounds.min_lat.to_string().as_str()));
    bounds_elem.push_attribute(("minlon", bounds.min_lon.to_string().as_str()));
    bounds_elem.push_attribute(("maxlat", bounds.max_lat.to_string().as_str()));
    bounds_elem.push_attribute(("maxlon", bounds.max_lon.to_string().as_str()));
    w.write_event(Event::Empty(bounds_elem)).map_err(encode_error)?;

    w.write_event(Event::Start(BytesStart::new("trk")))
        .map_err(encode_error)?;
    w.write_event(Event::Start(BytesStart::new("trkseg")))
        .map_err(encode_error)?;

    for loc in track.locations() {
        write_track_point(&mut w, loc)?;
    }

    w.write_event(Event::End(BytesEnd::new("trkseg")))
        .map_err(encode_error)?;
    w.write_event(Event::End(BytesEnd::new("trk")))
        .map_err(encode_error)?;
    w.write_event(Event::End(BytesEnd::new("gpx")))
        .map_err(encode_error)?;

    let mut inner = w.into_inner();
    inner.write_all(b"\n").map_err(encode_error)?;
    inner.flush().map_err(encode_error)?;

    Ok(track.len())
}

fn write_track_point<W: Write>(w: &mut Writer<W>, loc: &CanonicalLocation) -> Result<()> {
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", loc.latitude.to_string().as_str()));
    trkpt.push_attribute(("lon", loc.longitude.to_string().as_str()));
    w.write_event(Event::Start(trkpt)).map_err(encode_error)?;

    write_text_element(w, "time", &format_rfc3339(&loc.timestamp))?;
    write_text_element(w, "name", &format!("WPT.{}", loc.sequence))?;

    w.write_event(Event::End(BytesEnd::new("trkpt")))
        .map_err(encode_error)?;
    Ok(())
}

fn write_text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))
        .map_err(encode_error)?;
    w.write_event(Event::Text(BytesText::new(text)))
        .map_err(encode_error)?;
    w.write_event(Event::End(BytesEnd::new(name)))
        .map_err(encode_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ScanPolicy;
    use crate::parser::normalize;
    use crate::types::{DateRange, RawSample};
    use chrono::TimeZone;
    use std::io;

    fn sample(ts: &str, lat: i64, lon: i64) -> RawSample {
        RawSample {
            timestamp_ms: ts.to_string(),
            latitude_e7: Some(lat),
            longitude_e7: Some(lon),
            ..Default::default()
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 8, 17, 23, 50, 25).unwrap() + chrono::Duration::milliseconds(10)
    }

    fn render(track: &Track) -> String {
        let mut out = Vec::new();
        write_gpx(&mut out, track, generated_at()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_gpx_document_layout() {
        let samples = vec![
            sample("1000", 510751390, 124636890),
            sample("2500", 508441260, 124087570),
        ];
        let range = DateRange::parse("19700101-19700102").unwrap();
        let track = normalize(&samples, &range, ScanPolicy::Exhaustive);

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<gpx version=\"1.0\" creator=\"phototag\" xmlns=\"http://www.topografix.com/GPX/1/0\">\n\
\t<time>2021-08-17T23:50:25.01Z</time>\n\
\t<bounds minlat=\"50.844126\" minlon=\"12.408757\" maxlat=\"51.075139\" maxlon=\"12.463689\"/>\n\
\t<trk>\n\
\t\t<trkseg>\n\
\t\t\t<trkpt lat=\"51.075139\" lon=\"12.463689\">\n\
\t\t\t\t<time>1970-01-01T00:00:01Z</time>\n\
\t\t\t\t<name>WPT.0</name>\n\
\t\t\t</trkpt>\n\
\t\t\t<trkpt lat=\"50.844126\" lon=\"12.408757\">\n\
\t\t\t\t<time>1970-01-01T00:00:02.5Z</time>\n\
\t\t\t\t<name>WPT.1</name>\n\
\t\t\t</trkpt>\n\
\t\t</trkseg>\n\
\t</trk>\n\
</gpx>\n";
        assert_eq!(render(&track), expected);
    }

    #[test]
    fn test_gpx_empty_track_has_zero_bounds() {
        let range = DateRange::parse("20200101-20200102").unwrap();
        let track = normalize(&[sample("1000", 1, 1)], &range, ScanPolicy::Exhaustive);

        let doc = render(&track);
        assert!(doc.contains(r#"<bounds minlat="0" minlon="0" maxlat="0" maxlon="0"/>"#));
        assert!(!doc.contains("<trkpt"));
        assert!(!doc.contains("inf"));
        assert!(doc.contains("<trkseg>"));
        assert!(doc.contains("</trkseg>"));
    }

    #[test]
    fn test_gpx_bounds_contain_every_point() {
        let samples: Vec<RawSample> = (0..20)
            .map(|i| sample(&(1000 + i * 1000).to_string(), 400000000 + i * 13_579, -740000000 - i * 24_681))
            .collect();
        let range = DateRange::parse("19700101-19700102").unwrap();
        let track = normalize(&samples, &range, ScanPolicy::Exhaustive);

        let bounds = track_bounds(&track);
        for loc in track.locations() {
            assert!(bounds.contains(loc.latitude, loc.longitude));
        }
        assert_eq!(render(&track).matches("<trkpt ").count(), 20);
    }

    #[test]
    fn test_gpx_keeps_full_precision() {
        let range = DateRange::parse("19700101-19700102").unwrap();
        let track = normalize(&[sample("1000", 387093491, -91464237)], &range, ScanPolicy::Exhaustive);
        assert!(render(&track).contains(r#"<trkpt lat="38.7093491" lon="-9.1464237">"#));
    }

    struct ClosedSink;

    impl io::Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "destination closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_gpx_write_error() {
        let track = normalize(&[], &DateRange::default(), ScanPolicy::Exhaustive);
        let err = write_gpx(ClosedSink, &track, generated_at()).unwrap_err();
        assert!(matches!(err, ConvertError::Encode(_)));
    }
}
