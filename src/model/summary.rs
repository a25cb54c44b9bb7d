//! Weekly roll-up of a calendar.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ContentType;

/// Entries planned for one topic within a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    pub name: String,
    pub count: usize,
}

/// Counts over a seven-day window starting at `week_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_start: Date,
    pub week_end: Date,

    /// Days since January 1 divided into sevens, 1-based.
    /// Drifts from calendar weeks near year boundaries.
    pub week_number: i16,

    /// ISO-8601 week number of `week_start`.
    pub iso_week: i8,

    pub total: usize,
    pub by_topic: BTreeMap<String, TopicCount>,
    pub by_content_type: BTreeMap<ContentType, usize>,
}
