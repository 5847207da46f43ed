//! Study content and the cursors that walk it.
//!
//! A discipline's content is consumed through [`ContentCursor`], a
//! bidirectional position into an ordered sequence. Three backings exist:
//! - [`ListCursor`]: an owned, fully materialized list
//! - [`SubjectCursor`]: ordered subjects, each a [`ListCursor`]
//! - [`StreamCursor`]: rows read lazily from a table, one-level unread

mod item;
mod list;
mod stream;
mod subject;

pub use item::{Content, CONTENT_COLUMNS};
pub use list::ListCursor;
pub use stream::StreamCursor;
pub use subject::{Subject, SubjectCursor};

use chrono::Duration;

use crate::error::CursorError;

/// Bidirectional cursor over content items.
///
/// The cursor starts before the first item. `EndOfList` and
/// `BeginningOfList` leave the position unchanged.
pub trait ContentCursor: Send {
    /// Advance and return the item under the cursor.
    fn next(&mut self) -> Result<&mut Content, CursorError>;

    /// Undo the last successful `next`.
    fn back(&mut self) -> Result<(), CursorError>;

    /// Sum of every item's duration, or `None` when the backing cannot know.
    fn total_duration(&self) -> Option<Duration> {
        None
    }

    /// Release the underlying resource.
    fn close(&mut self) -> Result<(), CursorError> {
        Ok(())
    }
}
