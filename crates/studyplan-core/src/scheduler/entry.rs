//! Scheduled study sessions.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};

use crate::duration::format_duration;

/// Header row of the output table.
pub const OUTPUT_HEADER: [&str; 6] = [
    "Datetime",
    "Discipline",
    "Subject",
    "Title",
    "Reference",
    "Duration",
];

/// One placed content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledEntry {
    #[serde(serialize_with = "serialize_datetime")]
    pub at: DateTime<FixedOffset>,
    pub discipline: String,
    pub subject: String,
    pub title: String,
    pub reference: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

impl ScheduledEntry {
    /// RFC 3339 start time with whole seconds, `Z` for UTC.
    pub fn datetime(&self) -> String {
        self.at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Fields in [`OUTPUT_HEADER`] order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.datetime(),
            self.discipline.clone(),
            self.subject.clone(),
            self.title.clone(),
            self.reference.clone(),
            format_duration(self.duration),
        ]
    }

    /// When the session ends.
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.at + self.duration
    }
}

fn serialize_datetime<S: Serializer>(
    at: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub(crate) fn serialize_duration<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}
