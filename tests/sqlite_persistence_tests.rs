#![cfg(feature = "sqlite")]

use chrono::{NaiveDate, NaiveTime, Weekday};
use program_tool::{
    CalendarEvent, ProgramState, ProgramStore, SqliteProgramStore, TimeRange,
};
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn build_sample_program() -> ProgramState {
    let mut state = ProgramState::new();
    state.set_range(d(2024, 5, 1), d(2024, 6, 30));
    state.set_training_day(Weekday::Tue, true);
    state.set_time_for(Weekday::Tue, TimeRange::new(t(7, 0), t(8, 0)));
    state.force_off(d(2024, 5, 7));
    state.add_event(
        d(2024, 5, 18),
        CalendarEvent::new(
            "Revisión",
            "",
            "Club",
            TimeRange::new(t(10, 0), t(10, 45)),
            true,
        ),
    );
    state
}

#[test]
fn empty_store_loads_nothing() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteProgramStore::new(file.path()).unwrap();
    assert!(store.load_program().unwrap().is_none());
}

#[test]
fn store_round_trip_preserves_the_program() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteProgramStore::new(file.path()).unwrap();

    let state = build_sample_program();
    store.save_program(&state).unwrap();

    let loaded = store.load_program().unwrap().expect("stored program");
    assert_eq!(loaded, state);
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteProgramStore::new(file.path()).unwrap();

    store.save_program(&build_sample_program()).unwrap();

    let mut replacement = ProgramState::new();
    replacement.set_range(d(2025, 1, 1), d(2025, 1, 31));
    store.save_program(&replacement).unwrap();

    let loaded = store.load_program().unwrap().expect("stored program");
    assert_eq!(loaded, replacement);
}

#[test]
fn store_survives_reopening() {
    let file = NamedTempFile::new().unwrap();
    let state = build_sample_program();
    {
        let store = SqliteProgramStore::new(file.path()).unwrap();
        store.save_program(&state).unwrap();
    }
    let reopened = SqliteProgramStore::new(file.path()).unwrap();
    let loaded = reopened.load_program().unwrap().expect("stored program");
    assert_eq!(loaded, state);
}
