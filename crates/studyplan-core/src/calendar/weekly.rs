//! Weekly availability grid.
//!
//! Each weekday holds an ordered list of time-of-day windows. Windows are
//! merged as they are added so that, once sorted, no two windows of the same
//! weekday overlap or touch. Dates are materialized into absolute
//! [`TimeInterval`]s in the offset the calendar was loaded with.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc, Weekday,
};

use super::window::{TimeInterval, Window};
use crate::error::CalendarError;

/// Weekdays in the order the calendar table lists them.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Per-weekday availability windows.
#[derive(Debug, Clone)]
pub struct WeeklyCalendar {
    offset: FixedOffset,
    days: [Vec<Window>; 7],
}

impl WeeklyCalendar {
    /// Empty calendar whose dates materialize in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            days: Default::default(),
        }
    }

    /// Empty calendar in UTC.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Insert a window, coalescing it with every window it overlaps or touches.
    pub fn add(&mut self, weekday: Weekday, start: NaiveTime, end: NaiveTime) {
        let windows = &mut self.days[slot(weekday)];
        let mut merged = Window::new(start, end);

        // Each union may reach a window the previous one did not.
        while let Some(pos) = windows.iter().position(|w| w.touches(&merged)) {
            let existing = windows.remove(pos);
            merged = existing.union(&merged);
        }

        windows.push(merged);
    }

    /// Order every weekday's windows by start time.
    pub fn sort(&mut self) {
        for windows in self.days.iter_mut() {
            windows.sort_by_key(|w| w.start);
        }
    }

    /// Windows configured for a weekday.
    pub fn windows(&self, weekday: Weekday) -> &[Window] {
        &self.days[slot(weekday)]
    }

    /// True when no weekday has a window.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Whether the date's weekday has at least one window.
    pub fn has_windows_for(&self, date: NaiveDate) -> bool {
        !self.windows(date.weekday()).is_empty()
    }

    /// Next date after `from` whose weekday has windows.
    ///
    /// Scans at most one week ahead, so when only `from`'s own weekday has
    /// windows the result is `from + 7 days`.
    pub fn next_date(&self, from: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let mut date = from;
        for _ in 0..WEEKDAYS.len() {
            date = date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| CalendarError::OutOfRange(date.to_string()))?;
            if self.has_windows_for(date) {
                return Ok(date);
            }
        }
        Err(CalendarError::NoAvailableWeekday)
    }

    /// Absolute intervals for every window of the date's weekday, in order.
    pub fn intervals_for(&self, date: NaiveDate) -> Result<Vec<TimeInterval>, CalendarError> {
        self.windows(date.weekday())
            .iter()
            .map(|window| {
                Ok(TimeInterval::new(
                    self.materialize(date, window.start)?,
                    self.materialize(date, window.end)?,
                ))
            })
            .collect()
    }

    fn materialize(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<DateTime<FixedOffset>, CalendarError> {
        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| CalendarError::InvalidTimestamp {
                date: date.to_string(),
                time: time.format("%H:%M").to_string(),
            })
    }
}

impl Default for WeeklyCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

fn slot(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}
