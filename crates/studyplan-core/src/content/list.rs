//! In-memory cursor over a materialized content list.

use chrono::Duration;

use super::{Content, ContentCursor};
use crate::error::CursorError;

/// Cursor over an owned `Vec<Content>`.
///
/// `position` is `None` before the first successful `next`.
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    items: Vec<Content>,
    position: Option<usize>,
}

impl ListCursor {
    pub fn new(items: Vec<Content>) -> Self {
        Self {
            items,
            position: None,
        }
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the last element returned by `next`.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether `next` would succeed.
    pub fn has_next(&self) -> bool {
        self.next_index() < self.items.len()
    }

    pub(crate) fn push(&mut self, content: Content) {
        self.items.push(content);
    }

    fn next_index(&self) -> usize {
        self.position.map_or(0, |p| p + 1)
    }
}

impl ContentCursor for ListCursor {
    fn next(&mut self) -> Result<&mut Content, CursorError> {
        let index = self.next_index();
        if index >= self.items.len() {
            return Err(CursorError::EndOfList);
        }
        self.position = Some(index);
        Ok(&mut self.items[index])
    }

    fn back(&mut self) -> Result<(), CursorError> {
        self.position = match self.position {
            None => return Err(CursorError::BeginningOfList),
            Some(0) => None,
            Some(p) => Some(p - 1),
        };
        Ok(())
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(
            self.items
                .iter()
                .fold(Duration::zero(), |acc, c| acc + c.duration),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Content> {
        (1..=n)
            .map(|i| Content::new("S", format!("C{i}"), Duration::minutes(10), ""))
            .collect()
    }

    #[test]
    fn test_walks_forward_then_reports_end() {
        let mut cursor = ListCursor::new(items(5));
        for i in 1..=5 {
            assert_eq!(cursor.next().unwrap().title, format!("C{i}"));
        }
        assert!(matches!(cursor.next(), Err(CursorError::EndOfList)));
        // End of list leaves the pointer on the last element
        assert_eq!(cursor.position(), Some(4));
        cursor.back().unwrap();
        assert_eq!(cursor.next().unwrap().title, "C5");
    }

    #[test]
    fn test_back_before_next() {
        let mut cursor = ListCursor::new(items(2));
        assert!(matches!(cursor.back(), Err(CursorError::BeginningOfList)));
    }

    #[test]
    fn test_next_back_next_repeats() {
        let mut cursor = ListCursor::new(items(3));
        assert_eq!(cursor.next().unwrap().title, "C1");
        cursor.back().unwrap();
        assert_eq!(cursor.next().unwrap().title, "C1");
        assert_eq!(cursor.next().unwrap().title, "C2");
    }

    #[test]
    fn test_back_keeps_retreating() {
        let mut cursor = ListCursor::new(items(3));
        cursor.next().unwrap();
        cursor.next().unwrap();
        cursor.back().unwrap();
        cursor.back().unwrap();
        assert!(matches!(cursor.back(), Err(CursorError::BeginningOfList)));
        assert_eq!(cursor.next().unwrap().title, "C1");
    }

    #[test]
    fn test_attempts_persist_through_back() {
        let mut cursor = ListCursor::new(items(1));
        cursor.next().unwrap().attempts += 1;
        cursor.back().unwrap();
        assert_eq!(cursor.next().unwrap().attempts, 1);
    }

    #[test]
    fn test_total_duration_ignores_position() {
        let mut cursor = ListCursor::new(items(3));
        cursor.next().unwrap();
        assert_eq!(cursor.total_duration(), Some(Duration::minutes(30)));
        assert_eq!(ListCursor::default().total_duration(), Some(Duration::zero()));
    }
}
