//! Date normalization — canonical calendar-day keys
//!
//! All date equality and range comparisons in the core (conflict checks,
//! monthly aggregation, cascade queries) run on canonical `YYYY-MM-DD` keys,
//! never on raw timestamps. Comparing timestamps across time zones is a known
//! failure mode: `2024-03-05T23:59:59+02:00` is `2024-03-05` to the user who
//! entered it, whatever that instant is in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Canonical calendar-day key (`YYYY-MM-DD`)
///
/// Serialized as the plain day string, so stored dates compare correctly both
/// in memory and lexicographically in the document store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Normalize any supported date representation to its calendar day.
    ///
    /// Accepts a day-only string, an RFC 3339 timestamp (the day is taken in
    /// the input's own UTC offset — the day the user meant locally), or a
    /// naive `YYYY-MM-DDTHH:MM:SS` timestamp. Pure; unparseable input yields
    /// [`AppError::InvalidDate`].
    pub fn normalize(input: &str) -> AppResult<Self> {
        let raw = input.trim();
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(day));
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            // date_naive() is the local date in the timestamp's own offset
            return Ok(Self(ts.date_naive()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Ok(Self(ts.date()));
            }
        }
        Err(AppError::invalid_date(input))
    }

    pub fn from_date(day: NaiveDate) -> Self {
        Self(day)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Calendar month (`YYYY-MM`) with inclusive day bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        // Probe with day 1 to reject out-of-range months
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| AppError::invalid_date(format!("{year:04}-{month:02}")))
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(input: &str) -> AppResult<Self> {
        let raw = input.trim();
        let (year, month) = raw
            .split_once('-')
            .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
            .ok_or_else(|| AppError::invalid_date(input))?;
        Self::new(year, month)
    }

    /// First day of the month
    pub fn first_day(&self) -> DayKey {
        // Always valid: construction probed day 1
        DayKey(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    /// Last day of the month (inclusive upper bound)
    pub fn last_day(&self) -> DayKey {
        let (next_y, next_m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let first_of_next = NaiveDate::from_ymd_opt(next_y, next_m, 1).unwrap_or_default();
        DayKey(first_of_next.pred_opt().unwrap_or(first_of_next))
    }

    /// Whether a canonical day falls within this month (inclusive bounds)
    pub fn contains(&self, day: &DayKey) -> bool {
        day.0.year() == self.year && day.0.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
