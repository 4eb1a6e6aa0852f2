use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

use crate::program::ProgramState;
use crate::summary::{ProgramSummary, YearMonth};

/// Derive the aggregate statistics for a program by replaying the selection
/// rules over every date of the range. Returns `None` while no range is
/// defined. Pure function of the state: unmutated input, identical output.
pub fn calculate(state: &ProgramState) -> Option<ProgramSummary> {
    let start = state.min_date()?;
    let end = state.max_date()?;

    let mut minutes_by_month: BTreeMap<YearMonth, u32> = BTreeMap::new();
    let mut minutes_by_week: BTreeMap<u32, u32> = BTreeMap::new();
    let mut weeks_with_any: HashSet<u32> = HashSet::new();

    let mut selected_days = 0u32;
    let mut total_minutes = 0u32;

    let mut d = start;
    while d <= end {
        if state.is_selected(d) {
            selected_days += 1;

            let minutes = state
                .time_for(d.weekday())
                .map(|tr| tr.minutes())
                .unwrap_or(0);
            total_minutes += minutes;

            *minutes_by_month.entry(YearMonth::from(d)).or_insert(0) += minutes;

            let week = week_of_program(start, d);
            weeks_with_any.insert(week);
            *minutes_by_week.entry(week).or_insert(0) += minutes;
        }
        d = d + Duration::days(1);
    }

    let days_in_range = (end - start).num_days() + 1;
    let weeks_in_range = (days_in_range + 6) / 7;

    Some(ProgramSummary {
        start,
        end,
        selected_days,
        total_minutes,
        weeks_in_range,
        weeks_with_training: weeks_with_any.len() as u32,
        minutes_by_month,
        minutes_by_week,
    })
}

/// 1-based week index counted from the range start.
fn week_of_program(start: NaiveDate, d: NaiveDate) -> u32 {
    ((d - start).num_days() / 7 + 1) as u32
}
