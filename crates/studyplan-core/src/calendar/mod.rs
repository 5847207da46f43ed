//! Weekly availability calendar.
//!
//! This module provides:
//! - Time-of-day windows with merge-on-add per weekday
//! - Materialization of a date's windows into absolute intervals
//! - Parsing of the seven-row calendar table

mod table;
mod weekly;
mod window;

pub use table::{load_calendar, parse_calendar, parse_window};
pub use weekly::{WeeklyCalendar, WEEKDAYS};
pub use window::{TimeInterval, Window};
