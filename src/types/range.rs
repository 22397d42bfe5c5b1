use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::ConvertError;

/// Range used when the caller does not supply one
pub const DEFAULT_DATE_RANGE: &str = "19000101-21001231";

/// Time window `(start, end)`, exclusive at both ends.
///
/// Both bounds are UTC midnight of the dates named in the
/// `YYYYMMDD-YYYYMMDD` token, so `20170101-20170102` selects every location
/// recorded on 2017-01-01 except one stamped exactly at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range from two instants; `end` must be after `start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConvertError> {
        if end <= start {
            return Err(ConvertError::InvalidDateRange {
                input: format!("{start} - {end}"),
                reason: "end must be after start".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a `YYYYMMDD-YYYYMMDD` token
    pub fn parse(token: &str) -> Result<Self, ConvertError> {
        static TOKEN: OnceLock<Regex> = OnceLock::new();
        let re = TOKEN.get_or_init(|| {
            Regex::new(r"^(\d{4})(\d{2})(\d{2})-(\d{4})(\d{2})(\d{2})$")
                .expect("date range pattern is valid")
        });

        let invalid = |reason: &str| ConvertError::InvalidDateRange {
            input: token.to_string(),
            reason: reason.to_string(),
        };

        let caps = re
            .captures(token.trim())
            .ok_or_else(|| invalid("expected YYYYMMDD-YYYYMMDD"))?;

        // The pattern only admits ASCII digits, so the numeric parses cannot fail
        let field = |i: usize| caps[i].parse::<u32>().unwrap_or_default();
        let midnight = |y: usize| {
            NaiveDate::from_ymd_opt(field(y) as i32, field(y + 1), field(y + 2))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        };

        let start = midnight(1).ok_or_else(|| invalid("start is not a calendar date"))?;
        let end = midnight(4).ok_or_else(|| invalid("end is not a calendar date"))?;

        Self::new(start, end).map_err(|_| invalid("end must be after start"))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when `start < instant < end`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    /// True when nothing at or after `instant` can fall inside the range
    pub fn is_past(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        // 1900-01-01 and 2100-12-31 are both valid dates
        Self::parse(DEFAULT_DATE_RANGE).expect("default date range is valid")
    }
}

impl FromStr for DateRange {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}
