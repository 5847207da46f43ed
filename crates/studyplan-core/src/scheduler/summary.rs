//! Totals reported at the end of a run.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use super::entry::{serialize_duration, ScheduledEntry};
use crate::discipline::Discipline;

/// Per-discipline totals of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisciplineTotal {
    pub name: String,
    pub sessions: usize,
    /// Content time placed, gaps excluded.
    #[serde(serialize_with = "serialize_duration")]
    pub scheduled: Duration,
}

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub entries: usize,
    /// Calendar dates processed, including ones where nothing fit.
    pub dates: u32,
    /// Items skipped for exceeding their discipline's remaining daily limit.
    pub dropped: usize,
    pub first: Option<DateTime<FixedOffset>>,
    pub last: Option<DateTime<FixedOffset>>,
    pub disciplines: Vec<DisciplineTotal>,
}

impl RunSummary {
    pub(crate) fn new(disciplines: &[Discipline]) -> Self {
        Self {
            disciplines: disciplines
                .iter()
                .map(|d| DisciplineTotal {
                    name: d.name.clone(),
                    sessions: 0,
                    scheduled: Duration::zero(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, index: usize, entry: &ScheduledEntry) {
        self.entries += 1;
        self.first.get_or_insert(entry.at);
        self.last = Some(entry.at);
        if let Some(total) = self.disciplines.get_mut(index) {
            total.sessions += 1;
            total.scheduled = total.scheduled + entry.duration;
        }
    }

    /// Content time placed across all disciplines.
    pub fn scheduled_total(&self) -> Duration {
        self.disciplines
            .iter()
            .fold(Duration::zero(), |acc, d| acc + d.scheduled)
    }
}
