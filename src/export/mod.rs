//! Export functionality for location histories
//!
//! Ties the pipeline together: decode, normalize, then render to CSV or GPX.
//! [`convert`] works on any reader/writer pair; [`export_file`] adds the
//! file handling used by the CLI.

pub mod csv_writer;
pub mod gpx_writer;

pub use csv_writer::*;
pub use gpx_writer::*;

use crate::filters::ScanPolicy;
use crate::parser::{decode_location_history, normalize};
use crate::types::{DateRange, Track};
use crate::Result;
use chrono::Utc;
use log::info;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Gpx,
}

impl OutputFormat {
    /// Suffix appended to the input file name
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Gpx => "gpx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Gpx => write!(f, "GPX"),
        }
    }
}

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub gpx: bool,
    pub output_dir: Option<String>,
    pub range: DateRange,
    pub scan: ScanPolicy,
}

impl ExportOptions {
    /// Formats to produce, in a fixed order. CSV is the fallback when
    /// neither format was requested.
    pub fn formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        if self.csv || !self.gpx {
            formats.push(OutputFormat::Csv);
        }
        if self.gpx {
            formats.push(OutputFormat::Gpx);
        }
        formats
    }
}

/// Outcome of converting one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub format: OutputFormat,
    /// Samples in the input document
    pub decoded: usize,
    /// Locations written to the output
    pub written: usize,
    /// Samples dropped because they could not be normalized
    pub skipped_records: usize,
    /// Output file, when written through [`export_file`]
    pub output_path: Option<PathBuf>,
}

/// Render an already normalized track
pub fn write_track<W: Write>(writer: W, track: &Track, format: OutputFormat) -> Result<usize> {
    match format {
        OutputFormat::Csv => write_csv(writer, track),
        OutputFormat::Gpx => write_gpx(writer, track, Utc::now()),
    }
}

/// Convert one location-history document from `reader` into `format` on `writer`.
///
/// The document is decoded completely before anything is written, so a
/// decode failure leaves `writer` untouched.
pub fn convert<R: Read, W: Write>(
    reader: R,
    writer: W,
    range: &DateRange,
    format: OutputFormat,
    scan: ScanPolicy,
) -> Result<ConversionReport> {
    let samples = decode_location_history(reader)?;
    let track = normalize(&samples, range, scan);
    let written = write_track(writer, &track, format)?;

    Ok(ConversionReport {
        format,
        decoded: samples.len(),
        written,
        skipped_records: track.skipped().len(),
        output_path: None,
    })
}

/// Output path for `input_path` in `format`: the input file name with
/// `.csv` or `.gpx` appended, in `output_dir` or next to the input.
pub fn compute_export_path(
    input_path: &Path,
    format: OutputFormat,
    output_dir: Option<&str>,
) -> PathBuf {
    let file_name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "locations".to_string());
    let output_name = format!("{file_name}.{}", format.extension());

    match output_dir {
        Some(dir) => Path::new(dir).join(output_name),
        None => input_path.with_file_name(output_name),
    }
}

/// Decode and normalize the file at `input_path` once, then write every
/// format selected in `options`.
///
/// Stops at the first failing format; outputs written before it remain.
pub fn export_file(input_path: &Path, options: &ExportOptions) -> Result<Vec<ConversionReport>> {
    let file = File::open(input_path)?;
    let samples = decode_location_history(BufReader::new(file))?;
    let track = normalize(&samples, &options.range, options.scan);

    let mut reports = Vec::new();
    for format in options.formats() {
        let output_path = compute_export_path(input_path, format, options.output_dir.as_deref());
        if let Some(dir) = output_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let output = BufWriter::new(File::create(&output_path)?);
        let written = write_track(output, &track, format)?;
        info!(
            "Exported {written} locations to {format}: {}",
            output_path.display()
        );

        reports.push(ConversionReport {
            format,
            decoded: samples.len(),
            written,
            skipped_records: track.skipped().len(),
            output_path: Some(output_path),
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_default_to_csv() {
        let opts = ExportOptions::default();
        assert_eq!(opts.formats(), [OutputFormat::Csv]);

        let gpx_only = ExportOptions {
            gpx: true,
            ..Default::default()
        };
        assert_eq!(gpx_only.formats(), [OutputFormat::Gpx]);

        let both = ExportOptions {
            csv: true,
            gpx: true,
            ..Default::default()
        };
        assert_eq!(both.formats(), [OutputFormat::Csv, OutputFormat::Gpx]);
    }

    #[test]
    fn test_compute_export_path_appends_extension() {
        let path = compute_export_path(Path::new("data/Records.json"), OutputFormat::Csv, None);
        assert_eq!(path, Path::new("data/Records.json.csv"));

        let path = compute_export_path(Path::new("Records.json"), OutputFormat::Gpx, Some("out"));
        assert_eq!(path, Path::new("out/Records.json.gpx"));
    }

    #[test]
    fn test_convert_reports_counts() {
        let json = br#"{"locations": [
            {"timestampMs": "bad", "latitudeE7": 1, "longitudeE7": 1},
            {"timestampMs": "1000", "latitudeE7": 510751390, "longitudeE7": 124636890},
            {"timestampMs": "99999999999", "latitudeE7": 2, "longitudeE7": 2}
        ]}"#;
        let range = DateRange::parse("19700101-19700102").unwrap();
        let mut out = Vec::new();
        let report = convert(&json[..], &mut out, &range, OutputFormat::Csv, ScanPolicy::Exhaustive).unwrap();

        assert_eq!(report.decoded, 3);
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.output_path, None);
        assert!(String::from_utf8(out).unwrap().contains("1,51.075139,12.463689,1970/01/01,00:00:01.000"));
    }

    #[test]
    fn test_convert_decode_failure_writes_nothing() {
        let mut out = Vec::new();
        let result = convert(
            &b"not json"[..],
            &mut out,
            &DateRange::default(),
            OutputFormat::Gpx,
            ScanPolicy::Exhaustive,
        );
        assert_eq!(result.unwrap_err().stage(), "decode");
        assert!(out.is_empty());
    }
}
