//! Availability windows: time-of-day templates and their materialized form.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

/// A time-of-day availability span on a weekday template.
///
/// Bounds are inclusive for merging: `10:00-12:00` and `12:00-13:00` touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Window {
    /// Create a window. Callers keep `start <= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the two windows overlap or share a boundary.
    pub fn touches(&self, other: &Window) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest window covering both.
    pub fn union(&self, other: &Window) -> Window {
        Window {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// An absolute time range on a concrete date.
///
/// The scheduler consumes an interval by advancing `start` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeInterval {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Time left between `start` and `end`.
    pub fn remaining(&self) -> Duration {
        self.end - self.start
    }

    /// True once `start` has reached `end`.
    pub fn is_exhausted(&self) -> bool {
        self.start >= self.end
    }

    /// Move `start` forward, never past `end`.
    pub fn advance(&mut self, by: Duration) {
        self.start = (self.start + by).min(self.end);
    }

    /// Whether `length` fits in the remaining time.
    pub fn can_fit(&self, length: Duration) -> bool {
        self.remaining() >= length
    }
}
