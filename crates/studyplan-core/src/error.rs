//! Core error types for studyplan-core.
//!
//! Errors are grouped by concern: table formats, content cursors, the weekly
//! calendar, configuration, and the planner run that ties them together.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for a planning run.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed table data
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Content cursor failure other than a boundary sentinel
    #[error("Cursor error in discipline '{discipline}': {source}")]
    Cursor {
        discipline: String,
        #[source]
        source: CursorError,
    },

    /// Weekly calendar failure
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Content could not be placed within the retry budget
    #[error("Content '{title}' of discipline '{discipline}' is unplayable: {duration} does not fit after {attempts} attempts")]
    Unplayable {
        discipline: String,
        title: String,
        duration: String,
        attempts: u32,
    },

    /// A discipline with a zero daily limit can never receive content
    #[error("Discipline '{0}' has a zero daily limit")]
    ZeroDailyLimit(String),

    /// No content was fetched for too many consecutive dates
    #[error("Planner stalled: no progress over {0} consecutive dates")]
    Stalled(u32),

    /// Reading a table source failed
    #[error("Failed to read '{path}': {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV errors while writing output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PlanError {
    /// Attach the discipline name to a cursor error.
    pub fn cursor(discipline: impl Into<String>, source: CursorError) -> Self {
        PlanError::Cursor {
            discipline: discipline.into(),
            source,
        }
    }
}

/// Table and token format errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Duration token is not `HH:MM:SS`
    #[error("Duration '{0}' doesn't follow the HH:MM:SS pattern")]
    InvalidDurationFormat(String),

    /// Row has the wrong number of columns
    #[error("Row {row} has {found} columns, expected {expected}")]
    UnexpectedColumnsLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Calendar cell is not `HH:MM-HH:MM`
    #[error("Time interval '{0}' must have exactly a beginning and an end")]
    UnexpectedIntervalLength(String),

    /// Calendar table is missing weekday rows
    #[error("Calendar table must have a header and 7 weekday rows, found {0} rows")]
    UnexpectedGradeLength(usize),

    /// Calendar time is not `HH:MM`
    #[error("Invalid time of day '{0}'")]
    InvalidTime(String),

    /// Calendar window ends before it starts
    #[error("Window '{0}' ends before it starts")]
    InvertedWindow(String),
}

/// Content cursor errors.
///
/// `BeginningOfList` and `EndOfList` are boundary sentinels: the scheduler
/// handles them as control flow.
#[derive(Error, Debug)]
pub enum CursorError {
    #[error("Already at the beginning of the list")]
    BeginningOfList,

    #[error("Reached the end of the list")]
    EndOfList,

    /// Streaming cursor rewound without a pending read
    #[error("Cannot unread a row that was not read")]
    CannotUnread,

    /// Streaming cursor used after `close`
    #[error("Cursor is closed")]
    Closed,

    #[error("Invalid content row: {0}")]
    Format(#[from] FormatError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Weekly calendar errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// No weekday of the calendar has a window
    #[error("Could not find any weekday with available windows")]
    NoAvailableWeekday,

    /// Date + window time did not produce a single instant
    #[error("Cannot build a timestamp for {date} at {time}")]
    InvalidTimestamp { date: String, time: String },

    /// Stepping past the last representable date
    #[error("Date {0} is out of range")]
    OutOfRange(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to locate the configuration directory
    #[error("Failed to access configuration directory: {0}")]
    DataDir(String),
}

/// Result type alias for PlanError
pub type Result<T, E = PlanError> = std::result::Result<T, E>;
