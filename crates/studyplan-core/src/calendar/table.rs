//! Calendar table parsing.
//!
//! Layout: a header row, then seven rows Sunday through Saturday. Every cell
//! after the first holds one `HH:MM-HH:MM` window; an empty cell ends the row.

use std::path::Path;

use chrono::{FixedOffset, NaiveTime};
use csv::StringRecord;

use super::weekly::{WeeklyCalendar, WEEKDAYS};
use crate::error::{FormatError, Result};
use crate::storage::table::read_records;

const TIME_LAYOUT: &str = "%H:%M";

/// Read and parse the calendar table at `path`.
pub fn load_calendar(path: &Path, offset: FixedOffset) -> Result<WeeklyCalendar> {
    let records = read_records(path)?;
    Ok(parse_calendar(&records, offset)?)
}

/// Build a sorted calendar from table records (header included).
pub fn parse_calendar(
    records: &[StringRecord],
    offset: FixedOffset,
) -> Result<WeeklyCalendar, FormatError> {
    if records.len() < WEEKDAYS.len() + 1 {
        return Err(FormatError::UnexpectedGradeLength(records.len()));
    }

    let mut calendar = WeeklyCalendar::new(offset);
    for (record, weekday) in records[1..=WEEKDAYS.len()].iter().zip(WEEKDAYS) {
        for cell in record.iter().skip(1) {
            let cell = cell.trim();
            if cell.is_empty() {
                break;
            }
            let (start, end) = parse_window(cell)?;
            calendar.add(weekday, start, end);
        }
    }

    calendar.sort();
    Ok(calendar)
}

/// Parse a single `HH:MM-HH:MM` token.
pub fn parse_window(token: &str) -> Result<(NaiveTime, NaiveTime), FormatError> {
    let parts: Vec<&str> = token.split('-').collect();
    if parts.len() != 2 {
        return Err(FormatError::UnexpectedIntervalLength(token.to_string()));
    }

    let start = parse_time(parts[0])?;
    let end = parse_time(parts[1])?;
    if end < start {
        return Err(FormatError::InvertedWindow(token.to_string()));
    }
    Ok((start, end))
}

fn parse_time(raw: &str) -> Result<NaiveTime, FormatError> {
    NaiveTime::parse_from_str(raw.trim(), TIME_LAYOUT)
        .map_err(|_| FormatError::InvalidTime(raw.trim().to_string()))
}
