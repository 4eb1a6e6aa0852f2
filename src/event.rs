use crate::time_range::TimeRange;

/// Free-form entry attached to a single date. Events have no identity of
/// their own beyond their position in that date's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub time: TimeRange,
    /// Requests a 10-minute-prior alarm in the iCalendar export.
    pub reminder: bool,
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        time: TimeRange,
        reminder: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            time,
            reminder,
        }
    }
}
