use chrono::{NaiveTime, Timelike};

/// Time-of-day window for one session.
/// An `end` earlier than `start` means the window runs past midnight into
/// the next calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the window rolls over into the following day.
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Total length in minutes, never negative.
    /// Equal start and end yield 0, not a full day.
    pub fn minutes(&self) -> u32 {
        let start = i64::from(self.start.num_seconds_from_midnight());
        let mut end = i64::from(self.end.num_seconds_from_midnight());
        if end < start {
            end += 24 * 3600;
        }
        ((end - start) / 60).max(0) as u32
    }
}
