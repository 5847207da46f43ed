//! Round-robin study scheduler.
//!
//! This module provides:
//! - The run / date / interval state machine that packs content into the
//!   weekly calendar
//! - Gap-aware placement with per-day limits per discipline
//! - Backtracking of items that do not fit the current interval
//! - Output sinks and the run summary
//!
//! Disciplines take turns. A discipline keeps placing items until it runs
//! out of daily budget, content, or room in the interval; leaving a turn in
//! which it placed something costs its subject gap.

mod entry;
mod sink;
mod summary;

pub use entry::{ScheduledEntry, OUTPUT_HEADER};
pub use sink::{CsvSink, ScheduleSink};
pub use summary::{DisciplineTotal, RunSummary};

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::calendar::{TimeInterval, WeeklyCalendar};
use crate::discipline::Discipline;
use crate::duration::format_duration;
use crate::error::{CursorError, PlanError, Result};

/// Placement attempts before an item is declared unplayable.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 7;

/// Consecutive dates without a single fetch before the run gives up.
const MAX_IDLE_DATES: u32 = 7;

/// Tunables for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    pub max_attempts: u32,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

enum Flow {
    Continue,
    Finished,
}

/// Outcome of fetching the next item of the discipline on turn.
enum Step {
    Exhausted,
    OverLimit {
        title: String,
    },
    NoFit {
        title: String,
        duration: Duration,
        attempts: u32,
    },
    Place {
        entry: ScheduledEntry,
        total: Duration,
    },
}

/// Placement history within one interval, used to pick gaps.
#[derive(Debug, Default)]
struct IntervalState {
    placed: bool,
    previous_subject: Option<String>,
    previous_discipline: Option<usize>,
}

impl IntervalState {
    fn gap(
        &self,
        index: usize,
        subject: &str,
        content_gap: Duration,
        subject_gap: Duration,
    ) -> Duration {
        if !self.placed {
            return Duration::zero();
        }
        match self.previous_subject.as_deref() {
            Some(previous) if previous == subject => content_gap,
            Some(_) if self.previous_discipline == Some(index) => subject_gap,
            _ => Duration::zero(),
        }
    }

    fn placed(&mut self, index: usize, subject: String) {
        self.placed = true;
        self.previous_subject = Some(subject);
        self.previous_discipline = Some(index);
    }
}

/// Single-use scheduler over borrowed inputs.
pub struct Scheduler<'a> {
    calendar: &'a WeeklyCalendar,
    disciplines: &'a mut [Discipline],
    sink: &'a mut dyn ScheduleSink,
    start_date: NaiveDate,
    options: SchedulerOptions,

    current: usize,
    finished: Vec<bool>,
    finished_count: usize,
    daily_elapsed: Vec<Duration>,
    turn_elapsed: Duration,
    skips: usize,
    fetches: u64,
    summary: RunSummary,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        calendar: &'a WeeklyCalendar,
        disciplines: &'a mut [Discipline],
        start_date: NaiveDate,
        sink: &'a mut dyn ScheduleSink,
    ) -> Self {
        let count = disciplines.len();
        let summary = RunSummary::new(disciplines);
        Self {
            calendar,
            disciplines,
            sink,
            start_date,
            options: SchedulerOptions::default(),
            current: 0,
            finished: vec![false; count],
            finished_count: 0,
            daily_elapsed: vec![Duration::zero(); count],
            turn_elapsed: Duration::zero(),
            skips: 0,
            fetches: 0,
            summary,
        }
    }

    pub fn with_options(mut self, options: SchedulerOptions) -> Self {
        self.options = options;
        self
    }

    /// Schedule every discipline to exhaustion.
    ///
    /// Entries already handed to the sink stay there when the run aborts.
    /// Disciplines are left open; closing them is up to the owner.
    pub fn run(mut self) -> Result<RunSummary> {
        if self.disciplines.is_empty() {
            info!("no disciplines to schedule");
            return Ok(self.summary);
        }
        if let Some(discipline) = self
            .disciplines
            .iter()
            .find(|d| d.daily_limit <= Duration::zero())
        {
            return Err(PlanError::ZeroDailyLimit(discipline.name.clone()));
        }

        let mut date = if self.calendar.has_windows_for(self.start_date) {
            self.start_date
        } else {
            self.calendar.next_date(self.start_date)?
        };

        let mut idle_dates = 0;
        loop {
            let fetches = self.fetches;
            if let Flow::Finished = self.mount_date(date)? {
                break;
            }

            if self.fetches == fetches {
                idle_dates += 1;
                if idle_dates > MAX_IDLE_DATES {
                    return Err(PlanError::Stalled(idle_dates));
                }
            } else {
                idle_dates = 0;
            }

            date = self.calendar.next_date(date)?;
        }

        info!(
            entries = self.summary.entries,
            dates = self.summary.dates,
            dropped = self.summary.dropped,
            "schedule complete"
        );
        Ok(self.summary)
    }

    fn mount_date(&mut self, date: NaiveDate) -> Result<Flow> {
        debug!(%date, "scheduling date");
        self.daily_elapsed.fill(Duration::zero());
        self.turn_elapsed = Duration::zero();
        self.summary.dates += 1;

        for mut interval in self.calendar.intervals_for(date)? {
            let flow = self.mount_interval(&mut interval)?;
            self.sink.flush()?;
            if let Flow::Finished = flow {
                return Ok(Flow::Finished);
            }
        }
        Ok(Flow::Continue)
    }

    fn mount_interval(&mut self, interval: &mut TimeInterval) -> Result<Flow> {
        let count = self.disciplines.len();
        let mut state = IntervalState::default();
        self.skips = 0;

        while !interval.is_exhausted() && self.skips < count {
            let index = self.current;

            let limit_reached = self.daily_elapsed[index] >= self.disciplines[index].daily_limit;
            if self.finished[index] || limit_reached {
                self.next_turn(interval);
                state.previous_discipline = Some(index);
                continue;
            }

            let step = self.fetch(index, interval, &state)?;
            self.fetches += 1;

            match step {
                Step::Exhausted => {
                    debug!(discipline = %self.disciplines[index].name, "discipline exhausted");
                    self.finished[index] = true;
                    self.finished_count += 1;
                    if self.finished_count == count {
                        return Ok(Flow::Finished);
                    }
                    self.next_turn(interval);
                }
                Step::OverLimit { title } => {
                    debug!(
                        discipline = %self.disciplines[index].name,
                        %title,
                        "item exceeds the remaining daily limit, dropping it"
                    );
                    self.summary.dropped += 1;
                    self.next_turn(interval);
                    state.previous_discipline = Some(index);
                }
                Step::NoFit {
                    title,
                    duration,
                    attempts,
                } => {
                    let discipline = &mut self.disciplines[index];
                    if attempts >= self.options.max_attempts {
                        return Err(PlanError::Unplayable {
                            discipline: discipline.name.clone(),
                            title,
                            duration: format_duration(duration),
                            attempts,
                        });
                    }
                    debug!(discipline = %discipline.name, %title, attempts, "item does not fit");
                    discipline
                        .back()
                        .map_err(|err| PlanError::cursor(discipline.name.clone(), err))?;
                    self.next_turn(interval);
                }
                Step::Place { entry, total } => {
                    debug!(
                        at = %entry.datetime(),
                        discipline = %entry.discipline,
                        title = %entry.title,
                        "placed"
                    );
                    self.sink.record(&entry)?;
                    interval.advance(total);
                    self.daily_elapsed[index] = self.daily_elapsed[index] + total;
                    self.turn_elapsed = self.turn_elapsed + total;
                    self.summary.record(index, &entry);
                    state.placed(index, entry.subject);
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn fetch(
        &mut self,
        index: usize,
        interval: &TimeInterval,
        state: &IntervalState,
    ) -> Result<Step> {
        let elapsed = self.daily_elapsed[index];
        let discipline = &mut self.disciplines[index];
        let daily_limit = discipline.daily_limit;
        let content_gap = discipline.content_gap;
        let subject_gap = discipline.subject_gap;
        let name = discipline.name.clone();

        let content = match discipline.next() {
            Ok(content) => content,
            Err(CursorError::EndOfList) => return Ok(Step::Exhausted),
            Err(err) => return Err(PlanError::cursor(name, err)),
        };

        let gap = state.gap(index, &content.subject, content_gap, subject_gap);
        let total = content.duration + gap;

        if elapsed + total > daily_limit {
            return Ok(Step::OverLimit {
                title: content.title.clone(),
            });
        }

        if !interval.can_fit(total) {
            content.attempts += 1;
            return Ok(Step::NoFit {
                title: content.title.clone(),
                duration: content.duration,
                attempts: content.attempts,
            });
        }

        Ok(Step::Place {
            entry: ScheduledEntry {
                at: interval.start + gap,
                discipline: name,
                subject: content.subject.clone(),
                title: content.title.clone(),
                reference: content.reference.clone(),
                duration: content.duration,
            },
            total,
        })
    }

    /// Hand the turn to the next discipline.
    fn next_turn(&mut self, interval: &mut TimeInterval) {
        if self.turn_elapsed > Duration::zero() {
            interval.advance(self.disciplines[self.current].subject_gap);
        }
        self.current = (self.current + 1) % self.disciplines.len();
        self.turn_elapsed = Duration::zero();
        self.skips += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_placement_has_no_gap() {
        let state = IntervalState::default();
        assert_eq!(
            state.gap(0, "Algebra", Duration::minutes(5), Duration::minutes(15)),
            Duration::zero()
        );
    }

    #[test]
    fn test_gap_rules() {
        let mut state = IntervalState::default();
        state.placed(0, "Algebra".to_string());
        let content_gap = Duration::minutes(5);
        let subject_gap = Duration::minutes(15);

        assert_eq!(state.gap(0, "Algebra", content_gap, subject_gap), content_gap);
        assert_eq!(state.gap(0, "Geometry", content_gap, subject_gap), subject_gap);
        // A different discipline with a different subject starts flush
        assert_eq!(state.gap(1, "Rome", content_gap, subject_gap), Duration::zero());
        // Subjects compare by name, even across disciplines
        assert_eq!(state.gap(1, "Algebra", content_gap, subject_gap), content_gap);
    }

    #[test]
    fn test_skip_marks_previous_discipline() {
        let mut state = IntervalState::default();
        state.placed(0, "Algebra".to_string());
        state.previous_discipline = Some(1);
        assert_eq!(
            state.gap(0, "Geometry", Duration::minutes(5), Duration::minutes(15)),
            Duration::zero()
        );
    }
}
