use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar month used as an aggregation key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(d: NaiveDate) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Aggregate statistics derived from one pass over a program's range.
/// Recomputed on demand, never mutated in place.
///
/// Program weeks are 1-based and counted from the range's start date; they
/// are not calendar weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub selected_days: u32,
    pub total_minutes: u32,
    pub weeks_in_range: i64,
    pub weeks_with_training: u32,
    pub minutes_by_month: BTreeMap<YearMonth, u32>,
    pub minutes_by_week: BTreeMap<u32, u32>,
}
