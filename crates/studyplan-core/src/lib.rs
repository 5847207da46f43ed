//! # Studyplan Core Library
//!
//! This library turns a weekly availability calendar and a list of study
//! disciplines into a concrete, gap-aware schedule of study sessions. The
//! `studyplan` CLI is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Calendar**: weekday windows merged on insert and materialized per date
//! - **Content**: bidirectional cursors over a discipline's study items, either
//!   materialized by subject or streamed from the content table
//! - **Scheduler**: a round-robin state machine with per-day limits, gaps and
//!   backtracking of items that do not fit
//! - **Storage**: TOML configuration and CSV table I/O
//!
//! ## Key Components
//!
//! - [`WeeklyCalendar`]: per-weekday availability
//! - [`ContentCursor`]: the cursor capability shared by all content backings
//! - [`Discipline`]: pacing parameters plus content
//! - [`Scheduler`]: the planning engine
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod content;
pub mod discipline;
pub mod duration;
pub mod error;
pub mod planner;
pub mod scheduler;
pub mod storage;

pub use calendar::{load_calendar, TimeInterval, WeeklyCalendar, Window};
pub use content::{Content, ContentCursor, ListCursor, StreamCursor, Subject, SubjectCursor};
pub use discipline::{close_all, load_disciplines, Discipline, DisciplineSpec, StorageMode};
pub use duration::{format_duration, parse_duration};
pub use error::{CalendarError, ConfigError, CursorError, FormatError, PlanError};
pub use planner::{default_start_date, run_plan, PlanInputs, PlanRequest};
pub use scheduler::{
    CsvSink, RunSummary, ScheduleSink, ScheduledEntry, Scheduler, SchedulerOptions,
};
pub use storage::Config;
