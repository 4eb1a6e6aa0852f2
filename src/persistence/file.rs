use super::{PersistenceError, PersistenceResult};
use crate::calculator::calculate;
use crate::event::CalendarEvent;
use crate::program::{ProgramState, parse_weekday, weekday_name};
use crate::summary::ProgramSummary;
use crate::time_range::TimeRange;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

/// On-disk document for a program. String-typed on purpose: the load path
/// drops unrecognized weekday and date tokens entry by entry instead of
/// failing the whole document, and the `totals` block is write-only.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgramSnapshot {
    start: Option<String>,
    end: Option<String>,
    #[serde(default)]
    training_days: Vec<String>,
    #[serde(default)]
    time_by_day: BTreeMap<String, TimeRangeDoc>,
    #[serde(default)]
    force_on: Vec<String>,
    #[serde(default)]
    force_off: Vec<String>,
    #[serde(default)]
    events: BTreeMap<String, Vec<EventDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", skip_deserializing)]
    totals: Option<SummaryTotals>,
}

impl ProgramSnapshot {
    pub(crate) fn from_state(state: &ProgramState) -> Self {
        let training_days = ProgramState::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| state.training_days().contains(day))
            .map(|day| weekday_name(day).to_string())
            .collect();

        let mut time_by_day = BTreeMap::new();
        for day in ProgramState::ALL_WEEKDAYS {
            if let Some(range) = state.time_for(day) {
                time_by_day.insert(weekday_name(day).to_string(), TimeRangeDoc::from_range(range));
            }
        }

        let mut events = BTreeMap::new();
        for (date, list) in state.events() {
            events.insert(
                date.to_string(),
                list.iter().map(EventDoc::from_event).collect(),
            );
        }

        Self {
            start: state.start().map(|d| d.to_string()),
            end: state.end().map(|d| d.to_string()),
            training_days,
            time_by_day,
            force_on: state.forced_on().iter().map(ToString::to_string).collect(),
            force_off: state.forced_off().iter().map(ToString::to_string).collect(),
            events,
            totals: calculate(state).map(SummaryTotals::from_summary),
        }
    }

    pub(crate) fn into_state(self) -> PersistenceResult<ProgramState> {
        let mut state = ProgramState::new();

        if let Some(raw) = self.start {
            state.set_start(parse_date(&raw)?);
        }
        if let Some(raw) = self.end {
            state.set_end(parse_date(&raw)?);
        }

        for token in self.training_days {
            if let Some(day) = parse_weekday(token.trim()) {
                state.set_training_day(day, true);
            }
        }

        for (token, doc) in self.time_by_day {
            let Some(day) = parse_weekday(token.trim()) else {
                continue;
            };
            if let Some(range) = doc.to_range() {
                state.set_time_for(day, range);
            }
        }

        for token in self.force_on {
            if let Some(d) = parse_date_token(&token) {
                state.force_on(d);
            }
        }
        for token in self.force_off {
            if let Some(d) = parse_date_token(&token) {
                state.force_off(d);
            }
        }

        for (token, docs) in self.events {
            let Some(date) = parse_date_token(&token) else {
                continue;
            };
            for doc in docs {
                state.add_event(date, doc.into_event());
            }
        }

        Ok(state)
    }
}

#[derive(Default, Serialize, Deserialize)]
struct TimeRangeDoc {
    #[serde(default)]
    start: String,
    #[serde(default)]
    end: String,
}

impl TimeRangeDoc {
    fn from_range(range: TimeRange) -> Self {
        Self {
            start: format_time(range.start),
            end: format_time(range.end),
        }
    }

    fn to_range(&self) -> Option<TimeRange> {
        Some(TimeRange::new(
            parse_time(&self.start)?,
            parse_time(&self.end)?,
        ))
    }

    /// Unparseable event times degrade to an empty midnight window instead
    /// of dropping the event.
    fn to_range_or_midnight(&self) -> TimeRange {
        self.to_range()
            .unwrap_or_else(|| TimeRange::new(NaiveTime::MIN, NaiveTime::MIN))
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    time: TimeRangeDoc,
    #[serde(default)]
    reminder: bool,
}

impl EventDoc {
    fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            time: TimeRangeDoc::from_range(event.time),
            reminder: event.reminder,
        }
    }

    fn into_event(self) -> CalendarEvent {
        let time = self.time.to_range_or_midnight();
        CalendarEvent::new(self.title, self.description, self.location, time, self.reminder)
    }
}

/// Write-only summary block embedded in saves; ignored on load.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryTotals {
    start: String,
    end: String,
    weeks_in_range: i64,
    weeks_with_training: u32,
    selected_days: u32,
    total_minutes: u32,
}

impl SummaryTotals {
    fn from_summary(summary: ProgramSummary) -> Self {
        Self {
            start: summary.start.to_string(),
            end: summary.end.to_string(),
            weeks_in_range: summary.weeks_in_range,
            weeks_with_training: summary.weeks_with_training,
            selected_days: summary.selected_days,
            total_minutes: summary.total_minutes,
        }
    }
}

pub fn save_program_to_json<P: AsRef<Path>>(state: &ProgramState, path: P) -> PersistenceResult<()> {
    let snapshot = ProgramSnapshot::from_state(state);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_program_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProgramState> {
    let file = File::open(path)?;
    let snapshot: ProgramSnapshot = serde_json::from_reader(file)?;
    snapshot.into_state()
}

/// Flat summary table: one `fecha,dow,minutos` row per selected date, a
/// blank line, then the `resumen,valor` totals.
pub fn save_summary_to_csv<P: AsRef<Path>>(state: &ProgramState, path: P) -> PersistenceResult<()> {
    let summary = calculate(state).ok_or(PersistenceError::MissingRange)?;

    let mut days = csv::Writer::from_writer(Vec::new());
    days.write_record(["fecha", "dow", "minutos"])?;
    let mut d = summary.start;
    while d <= summary.end {
        if state.is_selected(d) {
            let minutes = state
                .time_for(d.weekday())
                .map(|tr| tr.minutes())
                .unwrap_or(0);
            days.write_record([
                d.to_string(),
                weekday_name(d.weekday()).to_string(),
                minutes.to_string(),
            ])?;
        }
        d = d + Duration::days(1);
    }

    let mut totals = csv::Writer::from_writer(Vec::new());
    totals.write_record(["resumen", "valor"])?;
    totals.write_record([
        "semanas_del_rango".to_string(),
        summary.weeks_in_range.to_string(),
    ])?;
    totals.write_record([
        "semanas_con_entrenamiento".to_string(),
        summary.weeks_with_training.to_string(),
    ])?;
    totals.write_record([
        "dias_seleccionados".to_string(),
        summary.selected_days.to_string(),
    ])?;
    totals.write_record([
        "minutos_totales".to_string(),
        summary.total_minutes.to_string(),
    ])?;

    let mut out = days
        .into_inner()
        .map_err(|err| PersistenceError::Io(err.into_error()))?;
    out.push(b'\n');
    out.extend(
        totals
            .into_inner()
            .map_err(|err| PersistenceError::Io(err.into_error()))?,
    );
    fs::write(path, out)?;
    Ok(())
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn parse_date_token(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Times render without seconds when they are zero, `HH:MM:SS` otherwise.
fn format_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}
