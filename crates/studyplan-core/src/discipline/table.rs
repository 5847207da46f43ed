//! Discipline list and content table parsing.

use csv::StringRecord;

use super::DisciplineSpec;
use crate::content::{Content, Subject};
use crate::duration::parse_duration;
use crate::error::FormatError;
use crate::storage::table::is_blank;

/// Columns of a discipline list row: Name, Source, DailyLimit, ContentGap, SubjectGap.
pub const DISCIPLINE_COLUMNS: usize = 5;

/// Parse the discipline list (header included). A blank row ends the list.
pub fn parse_discipline_list(
    records: &[StringRecord],
) -> Result<Vec<DisciplineSpec>, FormatError> {
    let mut specs = Vec::new();

    for (row, record) in records.iter().enumerate().skip(1) {
        if is_blank(record) {
            break;
        }
        if record.len() != DISCIPLINE_COLUMNS {
            return Err(FormatError::UnexpectedColumnsLength {
                row,
                expected: DISCIPLINE_COLUMNS,
                found: record.len(),
            });
        }

        specs.push(DisciplineSpec {
            name: record[0].to_string(),
            source: record[1].to_string(),
            daily_limit: parse_duration(&record[2])?,
            content_gap: parse_duration(&record[3])?,
            subject_gap: parse_duration(&record[4])?,
        });
    }

    Ok(specs)
}

/// Parse a content table (header included) into subjects.
///
/// Subjects keep the order of their first appearance; items keep table order
/// within their subject.
pub fn parse_subjects(records: &[StringRecord]) -> Result<Vec<Subject>, FormatError> {
    let mut subjects: Vec<Subject> = Vec::new();

    for (row, record) in records.iter().enumerate().skip(1) {
        if is_blank(record) {
            break;
        }
        let content = Content::from_record(record, row)?;

        match subjects.iter_mut().find(|s| s.name == content.subject) {
            Some(subject) => subject.push(content),
            None => subjects.push(Subject::new(content.subject.clone(), vec![content])),
        }
    }

    Ok(subjects)
}
