//! Disciplines: pacing parameters plus a content cursor.
//!
//! A discipline is built from one row of the discipline list and owns the
//! cursor over its content table. Which cursor backs it is decided at load
//! time by [`StorageMode`].

mod loader;
mod table;

pub use loader::{load_disciplines, load_from_specs, StorageMode};
pub use table::{parse_discipline_list, parse_subjects, DISCIPLINE_COLUMNS};

use std::fmt;

use chrono::Duration;
use tracing::warn;

use crate::content::{Content, ContentCursor, StreamCursor, Subject, SubjectCursor};
use crate::error::{CursorError, PlanError, Result};

/// One parsed row of the discipline list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineSpec {
    pub name: String,
    /// Content table location, relative to the discipline list.
    pub source: String,
    pub daily_limit: Duration,
    pub content_gap: Duration,
    pub subject_gap: Duration,
}

/// A discipline ready to be scheduled.
pub struct Discipline {
    pub name: String,
    pub source: String,
    pub daily_limit: Duration,
    pub content_gap: Duration,
    pub subject_gap: Duration,
    content: Box<dyn ContentCursor>,
    item_count: Option<usize>,
    closed: bool,
}

impl Discipline {
    pub fn new(spec: DisciplineSpec, content: Box<dyn ContentCursor>) -> Self {
        Self {
            name: spec.name,
            source: spec.source,
            daily_limit: spec.daily_limit,
            content_gap: spec.content_gap,
            subject_gap: spec.subject_gap,
            content,
            item_count: None,
            closed: false,
        }
    }

    /// Discipline backed by materialized subjects.
    pub fn with_subjects(spec: DisciplineSpec, subjects: Vec<Subject>) -> Self {
        let cursor = SubjectCursor::new(subjects);
        let count = cursor.item_count();
        let mut discipline = Self::new(spec, Box::new(cursor));
        discipline.item_count = Some(count);
        discipline
    }

    /// Discipline backed by a streaming cursor.
    pub fn streaming<R>(spec: DisciplineSpec, cursor: StreamCursor<R>) -> Self
    where
        R: std::io::Read + Send + 'static,
    {
        Self::new(spec, Box::new(cursor))
    }

    pub fn next(&mut self) -> std::result::Result<&mut Content, CursorError> {
        self.content.next()
    }

    pub fn back(&mut self) -> std::result::Result<(), CursorError> {
        self.content.back()
    }

    /// Sum of content durations; `None` for streamed content.
    pub fn total_duration(&self) -> Option<Duration> {
        self.content.total_duration()
    }

    /// Number of content items when known up front.
    pub fn item_count(&self) -> Option<usize> {
        self.item_count
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the content cursor. Later calls are no-ops.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.content
            .close()
            .map_err(|err| PlanError::cursor(self.name.clone(), err))
    }
}

impl fmt::Debug for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Discipline")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("daily_limit", &self.daily_limit)
            .field("content_gap", &self.content_gap)
            .field("subject_gap", &self.subject_gap)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Close every discipline, returning the first failure after trying all.
pub fn close_all(disciplines: &mut [Discipline]) -> Result<()> {
    let mut first_error = None;
    for discipline in disciplines.iter_mut() {
        if let Err(err) = discipline.close() {
            warn!(discipline = %discipline.name, error = %err, "failed to close content");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn spec(name: &str) -> DisciplineSpec {
        DisciplineSpec {
            name: name.to_string(),
            source: format!("{name}.csv"),
            daily_limit: Duration::hours(1),
            content_gap: Duration::zero(),
            subject_gap: Duration::zero(),
        }
    }

    #[test]
    fn test_materialized_discipline() {
        let subjects = vec![Subject::new(
            "S",
            vec![
                Content::new("S", "one", Duration::minutes(10), ""),
                Content::new("S", "two", Duration::minutes(5), ""),
            ],
        )];
        let mut discipline = Discipline::with_subjects(spec("Math"), subjects);

        assert_eq!(discipline.item_count(), Some(2));
        assert_eq!(discipline.total_duration(), Some(Duration::minutes(15)));
        assert_eq!(discipline.next().unwrap().title, "one");
        discipline.back().unwrap();
        assert_eq!(discipline.next().unwrap().title, "one");
    }

    #[test]
    fn test_close_is_idempotent() {
        let stream =
            StreamCursor::new(Cursor::new(b"h,h,h,h\nS,one,00:10:00,\n".to_vec())).unwrap();
        let mut disciplines = vec![
            Discipline::streaming(spec("History"), stream),
            Discipline::with_subjects(spec("Math"), Vec::new()),
        ];

        close_all(&mut disciplines).unwrap();
        close_all(&mut disciplines).unwrap();
        assert!(disciplines.iter().all(Discipline::is_closed));
        assert!(matches!(disciplines[0].next(), Err(CursorError::Closed)));
        assert_eq!(disciplines[0].total_duration(), None);
        assert_eq!(disciplines[0].item_count(), None);
    }
}
