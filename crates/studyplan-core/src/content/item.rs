//! A single study item.

use chrono::Duration;
use csv::StringRecord;

use crate::duration::parse_duration;
use crate::error::FormatError;

/// Columns of a content row: Subject, Title, Duration, Reference.
pub const CONTENT_COLUMNS: usize = 4;

/// One study item of a discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub subject: String,
    pub title: String,
    pub duration: Duration,
    pub reference: String,
    /// Failed placement attempts, incremented by the scheduler.
    pub attempts: u32,
}

impl Content {
    pub fn new(
        subject: impl Into<String>,
        title: impl Into<String>,
        duration: Duration,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
            duration,
            reference: reference.into(),
            attempts: 0,
        }
    }

    /// Build from a content table row. `row` is only used for error reporting.
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self, FormatError> {
        if record.len() != CONTENT_COLUMNS {
            return Err(FormatError::UnexpectedColumnsLength {
                row,
                expected: CONTENT_COLUMNS,
                found: record.len(),
            });
        }

        Ok(Self::new(
            &record[0],
            &record[1],
            parse_duration(&record[2])?,
            &record[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record = StringRecord::from(vec!["Algebra", "Groups", "00:45:00", "ch. 3"]);
        let content = Content::from_record(&record, 1).unwrap();
        assert_eq!(content.subject, "Algebra");
        assert_eq!(content.duration, Duration::minutes(45));
        assert_eq!(content.reference, "ch. 3");
        assert_eq!(content.attempts, 0);
    }

    #[test]
    fn test_from_record_column_count() {
        let record = StringRecord::from(vec!["Algebra", "Groups", "00:45:00"]);
        assert_eq!(
            Content::from_record(&record, 4).unwrap_err(),
            FormatError::UnexpectedColumnsLength {
                row: 4,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_from_record_bad_duration() {
        let record = StringRecord::from(vec!["Algebra", "Groups", "45m", ""]);
        assert!(matches!(
            Content::from_record(&record, 1),
            Err(FormatError::InvalidDurationFormat(_))
        ));
    }
}
