use std::num::ParseIntError;

use thiserror::Error;

/// Errors that abort the conversion of a single input file
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input is not JSON, or is JSON of the wrong shape
    #[error("can't decode location history: {0}")]
    Decode(#[from] serde_json::Error),
    /// CSV destination failure
    #[error("can't write CSV: {0}")]
    Write(#[from] csv::Error),
    /// GPX serialization failure
    #[error("can't encode GPX: {0}")]
    Encode(String),
    /// I/O errors outside of the encoders (opening inputs, creating outputs)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Date range token that is not `YYYYMMDD-YYYYMMDD` or is empty
    #[error("can't parse date range {input:?}: {reason}")]
    InvalidDateRange { input: String, reason: String },
}

impl ConvertError {
    /// Short name of the pipeline stage that failed, for operator messages
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::Decode(_) => "decode",
            ConvertError::Write(_) => "csv",
            ConvertError::Encode(_) => "gpx",
            ConvertError::Io(_) => "io",
            ConvertError::InvalidDateRange { .. } => "config",
        }
    }
}

/// A single location sample that was skipped during normalization.
///
/// These never abort a conversion; they are logged and counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record {index}: can't parse timestamp {value:?}: {source}")]
    InvalidTimestamp {
        index: usize,
        value: String,
        source: ParseIntError,
    },
    #[error("record {index}: timestamp {millis}ms is out of range")]
    TimestampOutOfRange { index: usize, millis: i64 },
    #[error("record {index}: missing latitude or longitude")]
    MissingCoordinate { index: usize },
}

impl RecordError {
    /// Position of the offending sample in the decoded sequence
    pub fn index(&self) -> usize {
        match self {
            RecordError::InvalidTimestamp { index, .. }
            | RecordError::TimestampOutOfRange { index, .. }
            | RecordError::MissingCoordinate { index } => *index,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
