use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::event::CalendarEvent;
use crate::persistence::{PersistenceError, PersistenceResult};
use crate::program::ProgramState;
use crate::time_range::TimeRange;

const PROD_ID: &str = "-//TrainingCalendar//1.0//ES";

/// iCalendar renderer. Emits one VEVENT per selected date that has a
/// weekday schedule, plus one VEVENT per stored custom event. The zone
/// identifier is attached verbatim to DTSTART/DTEND; no conversion happens.
pub struct IcsExporter {
    tzid: String,
}

impl Default for IcsExporter {
    fn default() -> Self {
        Self::new("UTC")
    }
}

impl IcsExporter {
    pub fn new(tzid: impl Into<String>) -> Self {
        Self { tzid: tzid.into() }
    }

    pub fn tzid(&self) -> &str {
        &self.tzid
    }

    /// Render the full VCALENDAR document, CRLF-terminated. Requires a
    /// defined range.
    pub fn export(&self, state: &ProgramState) -> PersistenceResult<String> {
        let start = state.min_date().ok_or(PersistenceError::MissingRange)?;
        let end = state.max_date().ok_or(PersistenceError::MissingRange)?;

        let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let mut lines: Vec<String> = Vec::new();

        lines.push("BEGIN:VCALENDAR".into());
        lines.push(format!("PRODID:{PROD_ID}"));
        lines.push("VERSION:2.0".into());
        lines.push("CALSCALE:GREGORIAN".into());
        lines.push("METHOD:PUBLISH".into());

        let mut d = start;
        while d <= end {
            if state.is_selected(d) {
                // Dates whose weekday has no schedule are left out of the
                // recurring-session export.
                if let Some(range) = state.time_for(d.weekday()) {
                    self.push_session(&mut lines, d, range, &dtstamp);
                }
            }
            d = d + Duration::days(1);
        }

        for (date, events) in state.events() {
            for event in events {
                self.push_custom_event(&mut lines, *date, event, &dtstamp);
            }
        }

        lines.push("END:VCALENDAR".into());

        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
        for line in &lines {
            out.push_str(line);
            out.push_str("\r\n");
        }
        Ok(out)
    }

    pub fn export_to_path<P: AsRef<Path>>(
        &self,
        state: &ProgramState,
        path: P,
    ) -> PersistenceResult<()> {
        let ics = self.export(state)?;
        fs::write(path, ics)?;
        Ok(())
    }

    fn push_session(&self, lines: &mut Vec<String>, d: NaiveDate, range: TimeRange, dtstamp: &str) {
        let (dt_start, dt_end) = span_for(d, range);
        let summary = format!("Entrenamiento ({})", short_day_name(d.weekday()));

        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}-{}", d.format("%Y%m%d"), Uuid::new_v4()));
        lines.push(format!("SUMMARY:{}", escape_text(&summary)));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!(
            "DTSTART;TZID={}:{}",
            self.tzid,
            format_local(dt_start)
        ));
        lines.push(format!("DTEND;TZID={}:{}", self.tzid, format_local(dt_end)));
        lines.push("END:VEVENT".into());
    }

    fn push_custom_event(
        &self,
        lines: &mut Vec<String>,
        date: NaiveDate,
        event: &CalendarEvent,
        dtstamp: &str,
    ) {
        let (dt_start, dt_end) = span_for(date, event.time);

        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}-evt-{}", date.format("%Y%m%d"), Uuid::new_v4()));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        if !event.description.trim().is_empty() {
            lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
        }
        if !event.location.trim().is_empty() {
            lines.push(format!("LOCATION:{}", escape_text(&event.location)));
        }
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!(
            "DTSTART;TZID={}:{}",
            self.tzid,
            format_local(dt_start)
        ));
        lines.push(format!("DTEND;TZID={}:{}", self.tzid, format_local(dt_end)));

        if event.reminder {
            lines.push("BEGIN:VALARM".into());
            lines.push("TRIGGER:-PT10M".into());
            lines.push("ACTION:DISPLAY".into());
            lines.push(format!("DESCRIPTION:{}", escape_text(&event.title)));
            lines.push("END:VALARM".into());
        }

        lines.push("END:VEVENT".into());
    }
}

/// Combine a date with a time window; midnight-crossing windows end on the
/// next calendar day.
fn span_for(d: NaiveDate, range: TimeRange) -> (NaiveDateTime, NaiveDateTime) {
    let start = d.and_time(range.start);
    let end_date = if range.crosses_midnight() {
        d + Duration::days(1)
    } else {
        d
    };
    (start, end_date.and_time(range.end))
}

fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Backslash-escape the characters RFC 5545 reserves in text values.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\").replace(';', "\\;").replace(',', "\\,")
}

fn short_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lun",
        Weekday::Tue => "mar",
        Weekday::Wed => "mié",
        Weekday::Thu => "jue",
        Weekday::Fri => "vie",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}
