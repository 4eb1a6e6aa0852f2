use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::event::CalendarEvent;
use crate::time_range::TimeRange;

/// Canonical weekday name used by the save format and the CSV table.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Inverse of [`weekday_name`]. Unknown tokens yield `None` so loaders can
/// skip them instead of failing.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "MONDAY" => Some(Weekday::Mon),
        "TUESDAY" => Some(Weekday::Tue),
        "WEDNESDAY" => Some(Weekday::Wed),
        "THURSDAY" => Some(Weekday::Thu),
        "FRIDAY" => Some(Weekday::Fri),
        "SATURDAY" => Some(Weekday::Sat),
        "SUNDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The training program itself: range anchors, weekday filter, per-weekday
/// schedules, per-date overrides and per-date events. This is the single
/// source of truth for whether a date counts as selected; everything else
/// (summary, exports) is derived from it read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramState {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    training_days: HashSet<Weekday>,
    time_by_day: HashMap<Weekday, TimeRange>,
    force_on: BTreeSet<NaiveDate>,
    force_off: BTreeSet<NaiveDate>,
    events: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl ProgramState {
    pub const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn set_start(&mut self, d: NaiveDate) {
        self.start = Some(d);
    }

    pub fn set_end(&mut self, d: NaiveDate) {
        self.end = Some(d);
    }

    pub fn has_range(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Chronological lower anchor. The anchors themselves are stored in
    /// click order; normalization happens here, on every read.
    pub fn min_date(&self) -> Option<NaiveDate> {
        match (self.start, self.end) {
            (Some(a), Some(z)) => Some(a.min(z)),
            _ => None,
        }
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        match (self.start, self.end) {
            (Some(a), Some(z)) => Some(a.max(z)),
            _ => None,
        }
    }

    pub fn is_inside_range(&self, d: NaiveDate) -> bool {
        match (self.min_date(), self.max_date()) {
            (Some(a), Some(z)) => a <= d && d <= z,
            _ => false,
        }
    }

    /// Effective selection for a date. Priority order is load-bearing:
    /// per-date overrides win over the range, and the range over the
    /// weekday filter. An empty filter selects every in-range day.
    pub fn is_selected(&self, d: NaiveDate) -> bool {
        if self.force_on.contains(&d) {
            return true;
        }
        if self.force_off.contains(&d) {
            return false;
        }
        if !self.is_inside_range(d) {
            return false;
        }
        if self.training_days.is_empty() {
            return true;
        }
        self.training_days.contains(&d.weekday())
    }

    pub fn set_range(&mut self, a: NaiveDate, z: NaiveDate) {
        self.start = Some(a);
        self.end = Some(z);
    }

    /// Two-click range pick. The first click anchors `start`; a later click
    /// closes the range, swapping the anchors when it lands before `start`.
    pub fn close_range_at(&mut self, d: NaiveDate) {
        let Some(start) = self.start else {
            self.start = Some(d);
            self.end = None;
            return;
        };
        if d < start {
            self.end = Some(start);
            self.start = Some(d);
        } else {
            self.end = Some(d);
        }
    }

    /// Shift-click range adjustment. Once a full range exists, every further
    /// click re-anchors it with the same before/after comparison as
    /// [`close_range_at`].
    pub fn adjust_range_with(&mut self, d: NaiveDate) {
        let Some(start) = self.start else {
            self.start = Some(d);
            self.end = None;
            return;
        };
        if self.end.is_none() {
            self.close_range_at(d);
            return;
        }
        if d < start {
            self.end = Some(start);
            self.start = Some(d);
        } else {
            self.end = Some(d);
        }
    }

    /// Flip the override for a date based on its current effective
    /// selection. Afterwards exactly one of the two override sets holds it.
    pub fn toggle_exception(&mut self, d: NaiveDate) {
        if self.is_selected(d) {
            self.force_on.remove(&d);
            self.force_off.insert(d);
        } else {
            self.force_off.remove(&d);
            self.force_on.insert(d);
        }
    }

    /// Force a date selected without touching any other rule.
    pub fn force_on(&mut self, d: NaiveDate) {
        self.force_off.remove(&d);
        self.force_on.insert(d);
    }

    /// Force a date deselected without touching any other rule.
    pub fn force_off(&mut self, d: NaiveDate) {
        self.force_on.remove(&d);
        self.force_off.insert(d);
    }

    pub fn forced_on(&self) -> &BTreeSet<NaiveDate> {
        &self.force_on
    }

    pub fn forced_off(&self) -> &BTreeSet<NaiveDate> {
        &self.force_off
    }

    pub fn training_days(&self) -> &HashSet<Weekday> {
        &self.training_days
    }

    /// Activate or deactivate a weekday in the filter. Deactivating a
    /// weekday also discards its schedule.
    pub fn set_training_day(&mut self, day: Weekday, active: bool) {
        if active {
            self.training_days.insert(day);
        } else {
            self.training_days.remove(&day);
            self.time_by_day.remove(&day);
        }
    }

    pub fn time_for(&self, day: Weekday) -> Option<TimeRange> {
        self.time_by_day.get(&day).copied()
    }

    pub fn set_time_for(&mut self, day: Weekday, range: TimeRange) {
        self.time_by_day.insert(day, range);
    }

    pub fn clear_time_for(&mut self, day: Weekday) {
        self.time_by_day.remove(&day);
    }

    pub fn events(&self) -> &BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        &self.events
    }

    pub fn events_on(&self, d: NaiveDate) -> &[CalendarEvent] {
        self.events.get(&d).map(Vec::as_slice).unwrap_or(&[])
    }

    /// File an event under a date. The date's list stays ordered by event
    /// start time.
    pub fn add_event(&mut self, d: NaiveDate, event: CalendarEvent) {
        let list = self.events.entry(d).or_default();
        list.push(event);
        list.sort_by_key(|e| e.time.start);
    }

    /// Replace the event at `index`, re-sorting the list. Returns false when
    /// the date or index does not exist.
    pub fn replace_event(&mut self, d: NaiveDate, index: usize, event: CalendarEvent) -> bool {
        match self.events.get_mut(&d) {
            Some(list) if index < list.len() => {
                list[index] = event;
                list.sort_by_key(|e| e.time.start);
                true
            }
            _ => false,
        }
    }

    /// Remove one event. A date whose list empties disappears from the map.
    pub fn remove_event(&mut self, d: NaiveDate, index: usize) -> Option<CalendarEvent> {
        let list = self.events.get_mut(&d)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.events.remove(&d);
        }
        Some(removed)
    }

    pub fn clear_events(&mut self, d: NaiveDate) {
        self.events.remove(&d);
    }

    /// Deep-replace every field from another state. Afterwards `self` is a
    /// value-independent duplicate of `other`.
    pub fn copy_from(&mut self, other: &ProgramState) {
        self.clone_from(other);
    }
}

/// Session-scoped companion for the "single pinned outside-range date"
/// behavior. The pin is transient bookkeeping of the calling layer; it is
/// never persisted and starts unset with every session or load.
#[derive(Debug, Clone, Default)]
pub struct OutsidePin {
    last_click: Option<NaiveDate>,
}

impl OutsidePin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned(&self) -> Option<NaiveDate> {
        self.last_click
    }

    /// Toggle the forced selection of an out-of-range date, keeping at most
    /// one such pin alive. In-range dates are ignored. The guard that spares
    /// a previously pinned date checks only its current `force_on`
    /// membership, not how it got there.
    pub fn toggle(&mut self, state: &mut ProgramState, d: NaiveDate) {
        if state.is_inside_range(d) {
            return;
        }

        if let Some(prev) = self.last_click {
            if prev != d && !state.forced_on().contains(&prev) {
                state.force_on.remove(&prev);
            }
        }

        if state.forced_on().contains(&d) {
            state.force_on.remove(&d);
            if self.last_click == Some(d) {
                self.last_click = None;
            }
        } else {
            state.force_on(d);
            self.last_click = Some(d);
        }
    }
}
