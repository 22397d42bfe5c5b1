//! Takeout Export Library
//!
//! Converts location-history exports (a JSON document of timestamped E7
//! latitude/longitude samples) into CSV tables or GPX 1.0 tracks, restricted
//! to a date range.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `takeout-export` command-line binary
//!
//! # Quick Start
//!
//! Convert a document held in memory:
//! ```rust
//! use takeout_export::{convert, DateRange, OutputFormat, ScanPolicy};
//!
//! let json = br#"{"locations": [
//!     {"timestampMs": "1000", "latitudeE7": 510751390, "longitudeE7": 124636890}
//! ]}"#;
//! let range = DateRange::parse("19700101-19700102").unwrap();
//! let mut csv = Vec::new();
//! let report = convert(&json[..], &mut csv, &range, OutputFormat::Csv, ScanPolicy::Exhaustive).unwrap();
//! assert_eq!(report.written, 1);
//! ```
//!
//! Export a file next to its input (`Records.json` -> `Records.json.gpx`):
//! ```rust,no_run
//! use takeout_export::{export_file, ExportOptions};
//! use std::path::Path;
//!
//! let options = ExportOptions {
//!     gpx: true,
//!     range: "20170101-20180101".parse().unwrap(),
//!     ..Default::default()
//! };
//! for report in export_file(Path::new("Records.json"), &options).unwrap() {
//!     println!("{} locations -> {:?}", report.written, report.output_path);
//! }
//! ```
//!
//! # Public API
//!
//! ## Pipeline
//! - [`decode_location_history`] - Decode the JSON export into raw samples
//! - [`normalize`] - Convert and filter raw samples into a [`Track`]
//! - [`write_csv`] / [`write_gpx`] - Render a track
//! - [`convert`] - Decode, normalize and render in one call
//! - [`export_file`] - File-based conversion used by the CLI
//!
//! ## Data Types
//! - [`RawSample`] - One record as found in the export
//! - [`CanonicalLocation`] - Validated location in degrees with a UTC timestamp
//! - [`DateRange`] - Exclusive time window parsed from `YYYYMMDD-YYYYMMDD`
//! - [`BoundingRectangle`] - Extent of the points in a GPX track
//! - [`ExportOptions`] - Configuration for export operations

pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod types;

pub use conversion::*;
pub use error::*;
pub use export::*;
pub use filters::*;
pub use parser::*;
pub use types::*;
