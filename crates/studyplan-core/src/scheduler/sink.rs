//! Output sinks for scheduled entries.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use super::entry::{ScheduledEntry, OUTPUT_HEADER};
use crate::error::{PlanError, Result};

/// Receives entries in the order they are placed.
pub trait ScheduleSink {
    fn record(&mut self, entry: &ScheduledEntry) -> Result<()>;

    /// Called after each processed interval.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ScheduleSink for Vec<ScheduledEntry> {
    fn record(&mut self, entry: &ScheduledEntry) -> Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Writes the output table, header first.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
}

impl CsvSink<File> {
    /// Create (or truncate) the output table at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(OUTPUT_HEADER)?;
        Ok(Self { writer })
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| PlanError::Io(err.into_error()))
    }
}

impl<W: Write> ScheduleSink for CsvSink<W> {
    fn record(&mut self, entry: &ScheduledEntry) -> Result<()> {
        self.writer.write_record(entry.to_record())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
