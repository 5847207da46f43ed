//! File-to-file planning runs.
//!
//! [`PlanInputs`] owns the loaded disciplines for the duration of a run and
//! closes them whether the scheduler succeeds or aborts.

use std::path::PathBuf;

use chrono::{Days, FixedOffset, NaiveDate};
use tracing::info;

use crate::calendar::{load_calendar, WeeklyCalendar};
use crate::discipline::{close_all, load_disciplines, Discipline, StorageMode};
use crate::error::{CalendarError, Result};
use crate::scheduler::{RunSummary, ScheduleSink, Scheduler, SchedulerOptions};
use crate::storage::Config;

/// Inputs of a planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub calendar: PathBuf,
    pub disciplines: PathBuf,
    pub offset: FixedOffset,
    pub storage: StorageMode,
    pub start_date: NaiveDate,
    pub options: SchedulerOptions,
}

impl PlanRequest {
    /// Request using the configured tables and tunables.
    pub fn from_config(config: &Config, start_date: NaiveDate) -> Result<Self> {
        Ok(Self {
            calendar: config.files.calendar.clone(),
            disciplines: config.files.disciplines.clone(),
            offset: config.utc_offset()?,
            storage: config.planner.storage,
            start_date,
            options: config.scheduler_options(),
        })
    }
}

/// Start date used when none is given: `offset_days` after `today`.
pub fn default_start_date(today: NaiveDate, offset_days: u32) -> Result<NaiveDate> {
    today
        .checked_add_days(Days::new(u64::from(offset_days)))
        .ok_or_else(|| CalendarError::OutOfRange(today.to_string()).into())
}

/// Calendar and disciplines of a run, loaded before any output is opened.
#[derive(Debug)]
pub struct PlanInputs {
    pub calendar: WeeklyCalendar,
    pub disciplines: Vec<Discipline>,
}

impl PlanInputs {
    /// Read the calendar table and every discipline the request names.
    pub fn load(request: &PlanRequest) -> Result<Self> {
        let calendar = load_calendar(&request.calendar, request.offset)?;
        let disciplines = load_disciplines(&request.disciplines, request.storage)?;
        Ok(Self {
            calendar,
            disciplines,
        })
    }

    /// Schedule into `sink`, then close every discipline.
    pub fn schedule(
        mut self,
        request: &PlanRequest,
        sink: &mut dyn ScheduleSink,
    ) -> Result<RunSummary> {
        info!(
            start = %request.start_date,
            disciplines = self.disciplines.len(),
            "starting plan"
        );

        let outcome = Scheduler::new(
            &self.calendar,
            &mut self.disciplines,
            request.start_date,
            sink,
        )
        .with_options(request.options)
        .run();
        let closed = close_all(&mut self.disciplines);

        let summary = outcome?;
        closed?;
        Ok(summary)
    }

    /// Release the inputs without scheduling.
    pub fn close(mut self) -> Result<()> {
        close_all(&mut self.disciplines)
    }
}

/// Load both tables, schedule into `sink`, then close every discipline.
pub fn run_plan(request: &PlanRequest, sink: &mut dyn ScheduleSink) -> Result<RunSummary> {
    PlanInputs::load(request)?.schedule(request, sink)
}
