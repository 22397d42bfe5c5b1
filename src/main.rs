//! CLI binary for Takeout Export
//!
//! Converts each location-history file named on the command line to CSV
//! and/or GPX. A file that fails is reported and skipped; the rest of the
//! batch still runs.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use glob::glob;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use takeout_export::{export_file, DateRange, ExportOptions, ScanPolicy, DEFAULT_DATE_RANGE};

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("VERGEN_GIT_SHA"),
        " ",
        env!("VERGEN_GIT_COMMIT_DATE"),
        ", built ",
        env!("VERGEN_BUILD_DATE"),
        ")"
    )
}

fn build_command() -> Command {
    Command::new("Takeout Export")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version())
        .about("Convert location-history JSON exports to CSV tables or GPX tracks.")
        .arg(
            Arg::new("files")
                .help("Location-history JSON files to convert (supports globbing). Output is written to <file>.csv / <file>.gpx")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("date-range")
                .short('d')
                .long("date-range")
                .help("Exclusive date range (start, end) as YYYYMMDD-YYYYMMDD, e.g. 20170101-20171231. The end date must be later than the start date; same-day or reversed ranges are rejected")
                .value_name("RANGE")
                .default_value(DEFAULT_DATE_RANGE),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export locations to CSV (default when no format is given)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .visible_alias("gps")
                .help("Export locations to a GPX 1.0 track")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("assume-sorted")
                .long("assume-sorted")
                .help("Input is in ascending time order: stop reading a file at the first location past the range")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Expand glob patterns; plain paths are passed through unchanged
fn expand_input_paths(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !(pattern.contains('*') || pattern.contains('?') || pattern.contains('[')) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        match glob(pattern) {
            Ok(entries) => {
                let before = paths.len();
                for entry in entries {
                    match entry {
                        Ok(path) => paths.push(path),
                        Err(e) => warn!("Can't read glob match for '{pattern}': {e}"),
                    }
                }
                debug!("Glob pattern '{pattern}' matched {} files", paths.len() - before);
            }
            Err(e) => error!("Invalid glob pattern '{pattern}': {e}"),
        }
    }

    paths
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    let debug = matches.get_flag("debug");

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if debug { "debug" } else { "info" }),
    )
    .init();

    let file_patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let range_token = matches
        .get_one::<String>("date-range")
        .map(String::as_str)
        .unwrap_or(DEFAULT_DATE_RANGE);
    let range = DateRange::parse(range_token).context("Invalid --date-range")?;

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        gpx: matches.get_flag("gpx"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        range,
        scan: if matches.get_flag("assume-sorted") {
            ScanPolicy::AssumeAscending
        } else {
            ScanPolicy::Exhaustive
        },
    };
    debug!("Export options: {export_options:?}");
    info!("Date range: ({}, {})", range.start(), range.end());

    let input_files = expand_input_paths(&file_patterns);
    if input_files.is_empty() {
        error!("No input files found. Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut converted = 0usize;
    let mut failed = 0usize;
    let mut skipped_records = 0usize;

    for path in &input_files {
        info!("Processing: {}", path.display());

        let result = export_file(path, &export_options).with_context(|| {
            format!("Failed to convert {}", path.display())
        });

        match result {
            Ok(reports) => {
                converted += 1;
                if let Some(report) = reports.first() {
                    skipped_records += report.skipped_records;
                    if report.skipped_records > 0 {
                        warn!(
                            "{}: skipped {} of {} records that could not be parsed",
                            path.display(),
                            report.skipped_records,
                            report.decoded
                        );
                    }
                }
            }
            Err(e) => {
                failed += 1;
                let stage = e
                    .downcast_ref::<takeout_export::ConvertError>()
                    .map(|c| c.stage())
                    .unwrap_or("unknown");
                error!("[{stage}] {e:#}");
                error!("Continuing with next file...");
            }
        }
    }

    info!(
        "Converted {converted} of {} files ({failed} failed, {skipped_records} malformed records skipped)",
        input_files.len()
    );

    if converted == 0 {
        error!("No files were successfully converted. Use --debug for details.");
        std::process::exit(1);
    }

    Ok(())
}
