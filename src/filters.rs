//! Date-range filtering for normalized locations
//!
//! The normalizer asks [`classify`] what to do with every sample it has
//! converted. There is exactly one filter in the pipeline: encoders never
//! re-check the range, they trust the [`crate::Track`] they are given.
//!
//! # Scan policies
//!
//! Location exports are usually, but not always, sorted by time. The default
//! [`ScanPolicy::Exhaustive`] examines every sample. [`ScanPolicy::AssumeAscending`]
//! stops at the first sample at or past the end of the range, which is only
//! correct when the input really is in ascending order.

use crate::types::DateRange;
use chrono::{DateTime, Utc};

/// How the normalizer walks the sample sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Examine every sample, whatever the input order
    #[default]
    Exhaustive,
    /// Trust ascending input order and stop at the first sample past the range
    AssumeAscending,
}

/// Outcome of checking one timestamp against the range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    Skip,
    /// Skip this sample and everything after it
    Stop,
}

/// Decide whether a location stamped `timestamp` is emitted
pub fn classify(range: &DateRange, timestamp: DateTime<Utc>, policy: ScanPolicy) -> FilterDecision {
    if range.contains(timestamp) {
        return FilterDecision::Keep;
    }

    match policy {
        ScanPolicy::AssumeAscending if range.is_past(timestamp) => FilterDecision::Stop,
        _ => FilterDecision::Skip,
    }
}
