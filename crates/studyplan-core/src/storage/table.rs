//! CSV table I/O shared by the calendar, discipline and content loaders.
//!
//! Tables are read without header handling (callers skip the first row
//! themselves), with flexible row lengths so column-count errors surface as
//! [`FormatError`](crate::error::FormatError)s, and with every field trimmed.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{PlanError, Result};

/// Reader configuration used for every input table.
pub fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(Trim::All);
    builder
}

/// Read every record of the table at `path`.
pub fn read_records(path: &Path) -> Result<Vec<StringRecord>> {
    let source = |source| PlanError::Source {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = reader_builder().from_path(path).map_err(source)?;
    reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(source)
}

/// Read every record from an in-memory or streamed table.
pub fn parse_records<R: Read>(input: R) -> std::result::Result<Vec<StringRecord>, csv::Error> {
    reader_builder().from_reader(input).records().collect()
}

/// A row whose fields are all empty ends a table.
pub fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
