pub mod calculator;
pub mod event;
pub mod ics;
pub mod persistence;
pub mod program;
pub mod summary;
pub mod time_range;

pub use calculator::calculate;
pub use event::CalendarEvent;
pub use ics::IcsExporter;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteProgramStore;
pub use persistence::{
    PersistenceError, PersistenceResult, ProgramStore, load_program_from_json,
    save_program_to_json, save_summary_to_csv,
};
pub use program::{OutsidePin, ProgramState, parse_weekday, weekday_name};
pub use summary::{ProgramSummary, YearMonth};
pub use time_range::TimeRange;
