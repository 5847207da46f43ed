//! Lazy cursor reading one content row per `next`.
//!
//! Only the most recent row is kept, so a single `back` can be undone but a
//! second consecutive one fails with [`CursorError::CannotUnread`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, StringRecord};

use super::{Content, ContentCursor};
use crate::error::CursorError;
use crate::storage::table::{is_blank, reader_builder};

pub struct StreamCursor<R> {
    reader: Option<Reader<R>>,
    record: StringRecord,
    row: usize,
    current: Option<Content>,
    unread: Option<Content>,
    started: bool,
    exhausted: bool,
}

impl StreamCursor<File> {
    /// Open a content table and consume its header row.
    pub fn open(path: &Path) -> Result<Self, CursorError> {
        let file = File::open(path).map_err(csv::Error::from)?;
        Self::new(file)
    }
}

impl<R: Read> StreamCursor<R> {
    /// Wrap a table source, consuming its header row.
    pub fn new(input: R) -> Result<Self, CursorError> {
        let mut reader = reader_builder().from_reader(input);
        let mut header = StringRecord::new();
        let exhausted = !reader.read_record(&mut header)?;

        Ok(Self {
            reader: Some(reader),
            record: StringRecord::new(),
            row: 0,
            current: None,
            unread: None,
            started: false,
            exhausted,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    fn read_row(&mut self) -> Result<Option<Content>, CursorError> {
        let reader = self.reader.as_mut().ok_or(CursorError::Closed)?;
        if self.exhausted {
            return Ok(None);
        }

        if !reader.read_record(&mut self.record)? || is_blank(&self.record) {
            self.exhausted = true;
            return Ok(None);
        }

        self.row += 1;
        Ok(Some(Content::from_record(&self.record, self.row)?))
    }
}

impl<R: Read + Send> ContentCursor for StreamCursor<R> {
    fn next(&mut self) -> Result<&mut Content, CursorError> {
        if self.is_closed() {
            return Err(CursorError::Closed);
        }

        let content = match self.unread.take() {
            Some(content) => content,
            None => self.read_row()?.ok_or(CursorError::EndOfList)?,
        };

        self.started = true;
        Ok(self.current.insert(content))
    }

    fn back(&mut self) -> Result<(), CursorError> {
        if self.is_closed() {
            return Err(CursorError::Closed);
        }

        match self.current.take() {
            Some(content) => {
                self.unread = Some(content);
                Ok(())
            }
            None if self.started => Err(CursorError::CannotUnread),
            None => Err(CursorError::BeginningOfList),
        }
    }

    fn close(&mut self) -> Result<(), CursorError> {
        self.reader = None;
        self.current = None;
        self.unread = None;
        Ok(())
    }
}
