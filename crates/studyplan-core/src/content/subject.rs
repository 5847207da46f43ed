//! Subject-grouped cursor used by materialized disciplines.

use chrono::Duration;

use super::{Content, ContentCursor, ListCursor};
use crate::error::CursorError;

/// A named group of content items, in table order.
#[derive(Debug, Clone)]
pub struct Subject {
    pub name: String,
    cursor: ListCursor,
}

impl Subject {
    pub fn new(name: impl Into<String>, items: Vec<Content>) -> Self {
        Self {
            name: name.into(),
            cursor: ListCursor::new(items),
        }
    }

    pub fn items(&self) -> &[Content] {
        self.cursor.items()
    }

    pub(crate) fn push(&mut self, content: Content) {
        self.cursor.push(content);
    }
}

/// Walks subjects in order, moving to the next subject once the current one
/// runs out.
///
/// `back` retreats across subject boundaries until the very first item.
#[derive(Debug, Clone, Default)]
pub struct SubjectCursor {
    subjects: Vec<Subject>,
    current: usize,
}

impl SubjectCursor {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            current: 0,
        }
    }

    /// Number of content items across all subjects.
    pub fn item_count(&self) -> usize {
        self.subjects.iter().map(|s| s.cursor.len()).sum()
    }
}

impl ContentCursor for SubjectCursor {
    fn next(&mut self) -> Result<&mut Content, CursorError> {
        let Some(index) = (self.current..self.subjects.len())
            .find(|&i| self.subjects[i].cursor.has_next())
        else {
            return Err(CursorError::EndOfList);
        };

        self.current = index;
        self.subjects[index].cursor.next()
    }

    fn back(&mut self) -> Result<(), CursorError> {
        // Nearest subject, at or before the current one, that has been read
        let Some(index) = (0..=self.current)
            .rev()
            .find(|&i| self.subjects.get(i).is_some_and(|s| s.cursor.position().is_some()))
        else {
            return Err(CursorError::BeginningOfList);
        };

        self.current = index;
        self.subjects[index].cursor.back()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(
            self.subjects
                .iter()
                .filter_map(|s| s.cursor.total_duration())
                .fold(Duration::zero(), |acc, d| acc + d),
        )
    }
}
